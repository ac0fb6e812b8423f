#![allow(dead_code)]

use atp_forecast::browser::{PageDriver, SessionFactory};
use atp_forecast::config::BrowserSettings;
use atp_forecast::errors::ScrapeError;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ORIGIN: &str = "https://www.atptour.com";
pub const LANDING_URL: &str = "https://www.atptour.com/en/scores/current";
pub const RG_OVERVIEW: &str =
    "https://www.atptour.com/en/tournaments/roland-garros/520/overview";
pub const RG_DRAW: &str =
    "https://www.atptour.com/en/scores/current/roland-garros/520/draws";
pub const HALLE_DRAW: &str = "https://www.atptour.com/en/scores/current/halle/500/draws";

pub fn landing_page() -> String {
    r#"<html><body>
        <div id="onetrust-banner-sdk"><button id="onetrust-accept-btn-handler">Accept All Cookies</button></div>
        <div class="tournament tournament--expanded">
          <div class="badge"><img src="/assets/atpwt/images/tournament/badges/categorystamps_gs.png"></div>
          <h3 class="title"><a href="/en/tournaments/roland-garros/520/overview">Roland Garros</a></h3>
          <a href="/en/scores/current/roland-garros/520/draws">Draw</a>
        </div>
        <div class="tournament tournament--expanded">
          <div class="badge"><img src="/assets/atpwt/images/tournament/badges/categorystamps_500.png"></div>
          <h3 class="title"><a href="/en/tournaments/halle/500/overview">Halle</a></h3>
          <a href="/en/scores/current/halle/500/draws">Draw</a>
        </div>
      </body></html>"#
        .to_string()
}

pub fn empty_landing_page() -> String {
    r#"<html><body><div class="tournament--expanded-list"></div></body></html>"#.to_string()
}

pub fn overview_page(surface: &str) -> String {
    format!(
        r#"<html><body><div class="tourn_details">
             <div><span>Location</span><span>Paris, France</span></div>
             <div><span>Surface</span><span>{}</span></div>
           </div></body></html>"#,
        surface
    )
}

pub fn draw_page() -> String {
    r##"<html><body><div class="atp-draw-container">
        <div class="draw-item">
          <div class="player-info"><div class="name"><a href="/en/players/carlos-alcaraz/a0e2/overview">C. Alcaraz</a></div></div>
          <div class="player-info"><div class="name"><a href="#">TBA</a></div></div>
        </div>
        <div class="draw-item">
          <div class="player-info"><div class="name"><a href="/en/players/novak-djokovic/d643/overview">N. Djokovic</a></div></div>
          <div class="player-info"><div class="name"><a href="/en/players/daniil-medvedev/mm58/overview">D. Medvedev</a></div></div>
        </div>
        <div class="draw-item">
          <div class="player-info"><div class="name"><a href="/en/players/jannik-sinner/s0ag/overview">J. Sinner</a></div><div class="winner"></div></div>
          <div class="player-info"><div class="name"><a href="/en/players/casper-ruud/rh16/overview">C. Ruud</a></div></div>
        </div>
      </div></body></html>"##
        .to_string()
}

/// Shared counters the tests inspect after a run
#[derive(Debug, Default)]
pub struct Recorder {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub consent_clicks: AtomicUsize,
    pub visited: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

/// Serves canned markup by URL. A selector "appears" when the page's markup matches it.
pub struct FakeBrowser {
    pages: HashMap<String, String>,
    current: Option<String>,
    broken_clicks: bool,
    recorder: Arc<Recorder>,
}

impl FakeBrowser {
    fn current_page(&self) -> Option<&String> {
        self.current.as_ref().and_then(|url| self.pages.get(url))
    }

    fn page_matches(&self, css: &str) -> bool {
        let Ok(selector) = Selector::parse(css) else {
            return false;
        };
        self.current_page()
            .map(|markup| Html::parse_document(markup).select(&selector).next().is_some())
            .unwrap_or(false)
    }
}

impl PageDriver for FakeBrowser {
    fn goto(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.recorder.visited.lock().unwrap().push(url.to_string());
        self.current = Some(url.to_string());
        Ok(())
    }

    fn wait_for(&mut self, selector: &str, _timeout: Duration) -> Result<(), ScrapeError> {
        if self.page_matches(selector) {
            Ok(())
        } else {
            Err(ScrapeError::PageLoadTimeout {
                url: self.current.clone().unwrap_or_default(),
                marker: selector.to_string(),
            })
        }
    }

    fn settle(&mut self) -> Result<(), ScrapeError> {
        Ok(())
    }

    fn markup(&mut self) -> Result<String, ScrapeError> {
        self.current_page()
            .cloned()
            .ok_or_else(|| ScrapeError::Browser("no page loaded".to_string()))
    }

    fn click_if_present(
        &mut self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<bool, ScrapeError> {
        if self.page_matches(selector) {
            if self.broken_clicks {
                return Err(ScrapeError::Browser(format!("{} is not clickable", selector)));
            }
            self.recorder.consent_clicks.fetch_add(1, Ordering::SeqCst);
            return Ok(true);
        }
        Ok(false)
    }

    fn page_timeout(&self) -> Duration {
        Duration::from_millis(10)
    }

    fn close(&mut self) {
        self.recorder.closed.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakeSessions {
    pages: HashMap<String, String>,
    broken_clicks: bool,
    pub recorder: Arc<Recorder>,
}

impl FakeSessions {
    pub fn new(pages: &[(&str, String)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, markup)| (url.to_string(), markup.clone()))
                .collect(),
            broken_clicks: false,
            recorder: Arc::new(Recorder::default()),
        }
    }

    /// Every click fails, as when an overlay sits on top of the button
    pub fn with_broken_clicks(mut self) -> Self {
        self.broken_clicks = true;
        self
    }

    /// The live site: Roland Garros fully readable, Halle with neither overview nor draw
    pub fn live_site() -> Self {
        Self::new(&[
            (LANDING_URL, landing_page()),
            (RG_OVERVIEW, overview_page("Clay")),
            (RG_DRAW, draw_page()),
            (HALLE_DRAW, "<html><body><p>Draw not published</p></body></html>".to_string()),
        ])
    }
}

impl SessionFactory for FakeSessions {
    fn open(&self) -> Result<Box<dyn PageDriver>, ScrapeError> {
        self.recorder.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeBrowser {
            pages: self.pages.clone(),
            current: None,
            broken_clicks: self.broken_clicks,
            recorder: Arc::clone(&self.recorder),
        }))
    }
}

pub fn browser_settings() -> BrowserSettings {
    BrowserSettings {
        landing_url: LANDING_URL.to_string(),
        site_origin: ORIGIN.to_string(),
        consent_pause_ms: 0,
        ..BrowserSettings::default()
    }
}
