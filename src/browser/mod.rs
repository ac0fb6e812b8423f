pub mod consent;
pub mod session;

use log::warn;
use std::time::Duration;

use crate::errors::ScrapeError;

pub use consent::{try_dismiss_consent, ConsentOutcome};
pub use session::{ChromeSessionFactory, PageSession};

/// DOM element a navigation blocks on before the page markup is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker {
    pub selector: &'static str,
    /// Scroll through the page once the marker shows up, so lazy sections render
    pub settle: bool,
}

pub const LANDING_MARKER: PageMarker = PageMarker {
    selector: ".tournament--expanded",
    settle: false,
};

pub const OVERVIEW_MARKER: PageMarker = PageMarker {
    selector: ".tourn_details",
    settle: false,
};

pub const DRAW_MARKER: PageMarker = PageMarker {
    selector: ".atp-draw-container",
    settle: true,
};

/// OneTrust "Accept All Cookies" button
pub const CONSENT_BUTTON: &str = "#onetrust-accept-btn-handler";

/// One exclusively owned browser tab.
///
/// Every call mutates the tab's navigation state, so a driver is never shared:
/// one navigation at a time, in program order.
pub trait PageDriver {
    fn goto(&mut self, url: &str) -> Result<(), ScrapeError>;

    /// Block until `selector` matches in the live DOM, failing with
    /// [`ScrapeError::PageLoadTimeout`] once `timeout` elapses
    fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), ScrapeError>;

    fn settle(&mut self) -> Result<(), ScrapeError>;

    fn markup(&mut self) -> Result<String, ScrapeError>;

    /// Click `selector` if it appears within `timeout`. `Ok(false)` means it never showed up.
    fn click_if_present(&mut self, selector: &str, timeout: Duration) -> Result<bool, ScrapeError>;

    fn page_timeout(&self) -> Duration;

    /// Release the browser. Must be safe to call more than once.
    fn close(&mut self);

    /// Load `url`, wait for `marker` and return the rendered markup
    fn navigate(&mut self, url: &str, marker: &PageMarker) -> Result<String, ScrapeError> {
        self.goto(url)?;
        let timeout = self.page_timeout();
        self.wait_for(marker.selector, timeout)?;

        if marker.settle {
            if let Err(e) = self.settle() {
                warn!("Could not scroll {} before reading it: {}", url, e);
            }
        }

        self.markup()
    }
}

/// Opens a fresh browser session for each scrape run
pub trait SessionFactory: Send + Sync {
    fn open(&self) -> Result<Box<dyn PageDriver>, ScrapeError>;
}
