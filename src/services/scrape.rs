use log::{error, info, warn};
use std::time::Instant;

use crate::browser::{try_dismiss_consent, PageDriver, SessionFactory, LANDING_MARKER};
use crate::config::BrowserSettings;
use crate::domain::{Match, TournamentDescriptor, TournamentResult, SURFACE_UNAVAILABLE};
use crate::errors::ScrapeError;
use crate::extract::{
    DrawExtractor, DrawHeuristics, Extraction, SurfaceExtractor, TournamentListExtractor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Landing,
    Surface,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Stop the run and surface the error
    Abort,
    /// Substitute the stage's fallback value and carry on
    Degrade,
}

pub const STAGE_POLICIES: [(Stage, OnFailure); 3] = [
    (Stage::Landing, OnFailure::Abort),
    (Stage::Surface, OnFailure::Degrade),
    (Stage::Draw, OnFailure::Degrade),
];

pub fn policy_for(stage: Stage) -> OnFailure {
    STAGE_POLICIES
        .iter()
        .find(|(s, _)| *s == stage)
        .map(|(_, policy)| *policy)
        .unwrap_or(OnFailure::Abort)
}

/// Apply the stage's policy to an extraction outcome
fn resolve<T>(stage: Stage, outcome: Extraction<T>, fallback: T) -> Result<T, ScrapeError> {
    match outcome {
        Extraction::Ok(value) => Ok(value),
        Extraction::Degraded { value, reason } => {
            warn!("{:?} degraded: {}", stage, reason);
            Ok(value)
        }
        Extraction::Fatal(e) => match policy_for(stage) {
            OnFailure::Abort => Err(e),
            OnFailure::Degrade => {
                warn!("{:?} failed, using fallback: {}", stage, e);
                Ok(fallback)
            }
        },
    }
}

/// Closes the session however the run ends
struct SessionGuard(Box<dyn PageDriver>);

impl SessionGuard {
    fn driver(&mut self) -> &mut dyn PageDriver {
        self.0.as_mut()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Sequences one scrape pass over the live scores page
pub struct ScrapeOrchestrator {
    settings: BrowserSettings,
    tournaments: TournamentListExtractor,
    surfaces: SurfaceExtractor,
    draws: DrawExtractor,
}

impl ScrapeOrchestrator {
    pub fn new(settings: BrowserSettings) -> Result<Self, ScrapeError> {
        Self::with_heuristics(settings, DrawHeuristics::default())
    }

    pub fn with_heuristics(
        settings: BrowserSettings,
        heuristics: DrawHeuristics,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            tournaments: TournamentListExtractor::new(&settings.site_origin)?,
            surfaces: SurfaceExtractor::new()?,
            draws: DrawExtractor::new(heuristics)?,
            settings,
        })
    }

    /// Scrape every live tournament.
    ///
    /// An empty list means nothing is live. Only a landing page that never
    /// renders its tournament blocks fails the run.
    pub fn run(&self, sessions: &dyn SessionFactory) -> Result<Vec<TournamentResult>, ScrapeError> {
        info!("=== Scraping live tournaments ===");
        let started = Instant::now();

        let mut session = SessionGuard(sessions.open()?);
        let descriptors = self.load_landing(session.driver())?;

        if descriptors.is_empty() {
            info!("No live tournaments found");
            return Ok(Vec::new());
        }

        let mut results = Vec::with_capacity(descriptors.len());
        for (i, descriptor) in descriptors.iter().enumerate() {
            info!("[{}/{}] {}", i + 1, descriptors.len(), descriptor.name);
            results.push(self.scrape_tournament(session.driver(), descriptor)?);
        }

        info!(
            "=== Scraped {} tournaments in {:.1}s ===",
            results.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(results)
    }

    // --- Stages ---

    fn load_landing(
        &self,
        driver: &mut dyn PageDriver,
    ) -> Result<Vec<TournamentDescriptor>, ScrapeError> {
        let url = &self.settings.landing_url;
        info!("Opening {}", url);

        let landing = self.open_landing(driver, url);

        let outcome = match landing {
            Ok(markup) => Extraction::Ok(self.tournaments.extract(&markup)),
            Err(e) => {
                error!("Landing page unusable: {}", e);
                Extraction::Fatal(e)
            }
        };

        resolve(Stage::Landing, outcome, Vec::new())
    }

    fn open_landing(&self, driver: &mut dyn PageDriver, url: &str) -> Result<String, ScrapeError> {
        driver.goto(url)?;
        try_dismiss_consent(driver, self.settings.consent_timeout(), self.settings.consent_pause());

        let timeout = driver.page_timeout();
        driver.wait_for(LANDING_MARKER.selector, timeout)?;
        driver.markup()
    }

    fn scrape_tournament(
        &self,
        driver: &mut dyn PageDriver,
        descriptor: &TournamentDescriptor,
    ) -> Result<TournamentResult, ScrapeError> {
        let surface = match &descriptor.overview_url {
            Some(url) => self.surfaces.extract(driver, url.as_str()),
            None => Extraction::degraded(SURFACE_UNAVAILABLE.to_string(), "no overview link"),
        };
        let surface = resolve(Stage::Surface, surface, SURFACE_UNAVAILABLE.to_string())?;

        let matches = match &descriptor.draw_url {
            Some(url) => self.draws.extract(driver, url.as_str()),
            None => Extraction::degraded(Vec::new(), "no draw link"),
        };
        let matches: Vec<Match> = resolve(Stage::Draw, matches, Vec::new())?;

        info!("  → surface: {}, incomplete matches: {}", surface, matches.len());

        Ok(TournamentResult {
            tournament_name: descriptor.name.clone(),
            category: descriptor.category,
            surface,
            incomplete_matches: matches,
        })
    }
}
