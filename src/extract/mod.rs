pub mod draw;
pub mod names;
pub mod surface;
pub mod tournaments;

use scraper::{ElementRef, Selector};

use crate::errors::ScrapeError;

pub use draw::{DrawExtractor, DrawHeuristics};
pub use names::{NameDeriver, NameOutcome, NameStrategy, SentinelKind};
pub use surface::SurfaceExtractor;
pub use tournaments::TournamentListExtractor;

/// Outcome of one extraction stage.
///
/// `Degraded` still carries a usable value (a sentinel or a partial result);
/// `Fatal` means the stage produced nothing. Whether a `Fatal` stops the whole
/// run is decided by the caller's stage policy, not here.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<T> {
    Ok(T),
    Degraded { value: T, reason: String },
    Fatal(ScrapeError),
}

impl<T> Extraction<T> {
    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Extraction::Degraded {
            value,
            reason: reason.into(),
        }
    }

    /// The carried value, or `fallback` for a fatal outcome
    pub fn value_or(self, fallback: T) -> T {
        match self {
            Extraction::Ok(value) | Extraction::Degraded { value, .. } => value,
            Extraction::Fatal(_) => fallback,
        }
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("'{}': {}", css, e)))
}

/// Visible text of an element with whitespace runs collapsed
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_element_text_collapses_whitespace() {
        let html = Html::parse_fragment("<h3>  Roland\n   <span>Garros</span> </h3>");
        let h3 = html.select(&selector("h3").unwrap()).next().unwrap();
        assert_eq!(element_text(h3), "Roland Garros");
    }

    #[test]
    fn test_value_or_falls_back_only_on_fatal() {
        assert_eq!(Extraction::Ok(1).value_or(0), 1);
        assert_eq!(Extraction::degraded(2, "partial").value_or(0), 2);
        let fatal: Extraction<i32> = Extraction::Fatal(ScrapeError::Browser("gone".to_string()));
        assert_eq!(fatal.value_or(0), 0);
    }
}
