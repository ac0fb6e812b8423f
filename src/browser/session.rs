use headless_chrome::{Browser, LaunchOptions, Tab};
use log::{debug, info, warn};
use std::ffi::OsStr;
use std::fs;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use super::{PageDriver, SessionFactory};
use crate::config::BrowserSettings;
use crate::errors::ScrapeError;
use crate::rate_limiter::RateLimiter;

const SCROLL_TO_MIDDLE: &str = "window.scrollTo(0, document.body.scrollHeight / 2);";
const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Chrome instance with a single tab, driven over the DevTools protocol
pub struct PageSession {
    browser: Option<Browser>,
    tab: Arc<Tab>,
    settings: BrowserSettings,
    pacer: RateLimiter,
    current_url: String,
}

impl PageSession {
    /// Launch Chrome and open the tab every navigation of this session goes through
    pub fn open(settings: &BrowserSettings) -> Result<Self, ScrapeError> {
        let options = Self::build_launch_options(settings)?;
        let browser =
            Browser::new(options).map_err(|e| ScrapeError::browser("failed to launch Chrome", e))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::browser("failed to open a tab", e))?;
        tab.set_default_timeout(settings.page_timeout());

        info!("Browser session opened (headless: {})", settings.headless);

        Ok(Self {
            browser: Some(browser),
            tab,
            settings: settings.clone(),
            pacer: RateLimiter::new(settings.navigation_delay_ms),
            current_url: String::new(),
        })
    }

    // --- Construction Helpers ---

    fn build_launch_options(
        settings: &BrowserSettings,
    ) -> Result<LaunchOptions<'static>, ScrapeError> {
        let user_data_dir = Self::prepare_profile_dir(settings);

        LaunchOptions::default_builder()
            .headless(settings.headless)
            .sandbox(false)
            .window_size(Some(settings.window_size))
            .user_data_dir(user_data_dir)
            .idle_browser_timeout(settings.page_timeout() * 6)
            .args(vec![
                OsStr::new("--lang=en-US"),
                OsStr::new("--accept-lang=en-US,en"),
            ])
            .build()
            .map_err(|e| ScrapeError::browser("invalid Chrome launch options", e))
    }

    /// A persistent profile keeps the consent cookie between runs
    fn prepare_profile_dir(settings: &BrowserSettings) -> Option<std::path::PathBuf> {
        let dir = settings.user_data_dir.clone()?;
        match fs::create_dir_all(&dir) {
            Ok(()) => Some(dir),
            Err(e) => {
                warn!(
                    "Cannot use profile directory {}: {}; using a throwaway profile",
                    dir.display(),
                    e
                );
                None
            }
        }
    }

    fn ensure_open(&self) -> Result<(), ScrapeError> {
        if self.browser.is_none() {
            return Err(ScrapeError::SessionClosed);
        }
        Ok(())
    }
}

impl PageDriver for PageSession {
    fn goto(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.ensure_open()?;
        self.pacer.wait();

        debug!("Navigating to {}", url);
        self.tab
            .navigate_to(url)
            .map_err(|e| ScrapeError::browser(&format!("navigation to {} failed", url), e))?;

        // The marker wait below is the real bound; a slow load event only gets logged
        if let Err(e) = self.tab.wait_until_navigated() {
            debug!("Load event for {} did not arrive: {}", url, e);
        }

        self.current_url = url.to_string();
        Ok(())
    }

    fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), ScrapeError> {
        self.ensure_open()?;
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map(|_| ())
            .map_err(|e| {
                debug!("Waiting for {} on {} failed: {}", selector, self.current_url, e);
                ScrapeError::PageLoadTimeout {
                    url: self.current_url.clone(),
                    marker: selector.to_string(),
                }
            })
    }

    fn settle(&mut self) -> Result<(), ScrapeError> {
        self.ensure_open()?;
        let (mid, end) = self.settings.settle_delays();

        self.tab
            .evaluate(SCROLL_TO_MIDDLE, false)
            .map_err(|e| ScrapeError::browser("scroll failed", e))?;
        sleep(mid);
        self.tab
            .evaluate(SCROLL_TO_BOTTOM, false)
            .map_err(|e| ScrapeError::browser("scroll failed", e))?;
        sleep(end);
        Ok(())
    }

    fn markup(&mut self) -> Result<String, ScrapeError> {
        self.ensure_open()?;
        self.tab
            .get_content()
            .map_err(|e| ScrapeError::browser("failed to read page source", e))
    }

    fn click_if_present(&mut self, selector: &str, timeout: Duration) -> Result<bool, ScrapeError> {
        self.ensure_open()?;
        let element = match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
            Ok(element) => element,
            Err(e) => {
                debug!("{} not found: {}", selector, e);
                return Ok(false);
            }
        };

        element
            .click()
            .map(|_| true)
            .map_err(|e| ScrapeError::browser(&format!("click on {} failed", selector), e))
    }

    fn page_timeout(&self) -> Duration {
        self.settings.page_timeout()
    }

    fn close(&mut self) {
        if self.browser.take().is_some() {
            info!("Browser session closed after {} navigations", self.pacer.request_count());
        }
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Launches a real Chrome per scrape run
#[derive(Debug, Clone)]
pub struct ChromeSessionFactory {
    settings: BrowserSettings,
}

impl ChromeSessionFactory {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }
}

impl SessionFactory for ChromeSessionFactory {
    fn open(&self) -> Result<Box<dyn PageDriver>, ScrapeError> {
        Ok(Box::new(PageSession::open(&self.settings)?))
    }
}
