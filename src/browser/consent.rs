use log::{info, warn};
use std::thread::sleep;
use std::time::Duration;

use super::{PageDriver, CONSENT_BUTTON};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentOutcome {
    Dismissed,
    /// No banner showed up; usually the profile already carries the consent cookie
    Absent,
    Failed(String),
}

/// Accept the cookie banner if the site shows one.
///
/// Never fails the run: a missing banner and a broken click both let the scrape continue.
pub fn try_dismiss_consent(
    driver: &mut dyn PageDriver,
    wait: Duration,
    pause: Duration,
) -> ConsentOutcome {
    info!("Looking for the cookie banner...");

    match driver.click_if_present(CONSENT_BUTTON, wait) {
        Ok(true) => {
            info!("  → Cookie banner accepted");
            // the page re-renders its content once consent is stored
            if !pause.is_zero() {
                sleep(pause);
            }
            ConsentOutcome::Dismissed
        }
        Ok(false) => {
            info!("  → No cookie banner, continuing");
            ConsentOutcome::Absent
        }
        Err(e) => {
            warn!("Could not dismiss the cookie banner: {}", e);
            ConsentOutcome::Failed(e.to_string())
        }
    }
}
