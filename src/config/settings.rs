use log::warn;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub landing_url: String,
    pub site_origin: String,
    pub headless: bool,
    pub user_data_dir: Option<PathBuf>,
    pub window_size: (u32, u32),
    pub page_timeout_secs: u64,
    pub consent_timeout_secs: u64,
    pub consent_pause_ms: u64,
    pub settle_mid_ms: u64,
    pub settle_end_ms: u64,
    pub navigation_delay_ms: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            landing_url: "https://www.atptour.com/en/scores/current".to_string(),
            site_origin: "https://www.atptour.com".to_string(),
            headless: true,
            user_data_dir: Some(PathBuf::from("uc_profile_atp")),
            window_size: (1920, 1080),
            page_timeout_secs: 20,
            consent_timeout_secs: 10,
            consent_pause_ms: 2000,
            settle_mid_ms: 1000,
            settle_end_ms: 2000,
            navigation_delay_ms: 500,
        }
    }
}

impl BrowserSettings {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn consent_timeout(&self) -> Duration {
        Duration::from_secs(self.consent_timeout_secs)
    }

    pub fn consent_pause(&self) -> Duration {
        Duration::from_millis(self.consent_pause_ms)
    }

    pub fn settle_delays(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.settle_mid_ms),
            Duration::from_millis(self.settle_end_ms),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub compare_base_url: String,
    pub predict_base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            compare_base_url: "http://localhost:8000".to_string(),
            predict_base_url: "http://localhost:8001".to_string(),
            timeout_secs: 15,
            user_agent: "AtpForecast/0.1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub browser: BrowserSettings,
    pub services: ServiceSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `ATP_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Some(url) = env_override::<String>("ATP_BASE_URL") {
            config.services.compare_base_url = url;
        }
        if let Some(url) = env_override::<String>("ATP_PREDICTION_URL") {
            config.services.predict_base_url = url;
        }
        if let Some(headless) = env_override::<bool>("ATP_HEADLESS") {
            config.browser.headless = headless;
        }
        if let Some(secs) = env_override::<u64>("ATP_PAGE_TIMEOUT_SECS") {
            config.browser.page_timeout_secs = secs;
        }

        config
    }
}

fn env_override<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    parse_override(key, &raw)
}

fn parse_override<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: cannot parse '{}'", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_timeout_defaults_to_twenty_seconds() {
        let config = AppConfig::new();
        assert_eq!(config.browser.page_timeout(), Duration::from_secs(20));
        assert_eq!(config.browser.consent_timeout(), Duration::from_secs(10));
        assert_eq!(config.services.timeout_secs, 15);
    }

    #[test]
    fn test_invalid_override_is_ignored() {
        assert_eq!(parse_override::<u64>("ATP_PAGE_TIMEOUT_SECS", "soon"), None);
        assert_eq!(parse_override::<u64>("ATP_PAGE_TIMEOUT_SECS", " 12 "), Some(12));
        assert_eq!(parse_override::<bool>("ATP_HEADLESS", "false"), Some(false));
    }
}
