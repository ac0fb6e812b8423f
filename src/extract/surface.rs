use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};

use super::{element_text, selector, Extraction};
use crate::browser::{PageDriver, OVERVIEW_MARKER};
use crate::domain::SURFACE_UNAVAILABLE;
use crate::errors::ScrapeError;

const SURFACE_LABEL: &str = "Surface";

/// Reads the playing surface from a tournament overview page
pub struct SurfaceExtractor {
    details: Selector,
    label: Selector,
}

impl SurfaceExtractor {
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            details: selector("div.tourn_details")?,
            label: selector("span")?,
        })
    }

    /// Navigate to the overview page and read its surface.
    ///
    /// A page that never shows its details block is `Fatal`; anything wrong
    /// inside the block degrades to [`SURFACE_UNAVAILABLE`].
    pub fn extract(&self, driver: &mut dyn PageDriver, overview_url: &str) -> Extraction<String> {
        match driver.navigate(overview_url, &OVERVIEW_MARKER) {
            Ok(markup) => self.parse(&markup),
            Err(e) => Extraction::Fatal(e),
        }
    }

    pub fn parse(&self, markup: &str) -> Extraction<String> {
        let document = Html::parse_document(markup);

        let Some(details) = document.select(&self.details).next() else {
            return Self::unavailable("no tournament details block");
        };

        let Some(label) = details
            .select(&self.label)
            .find(|span| element_text(*span) == SURFACE_LABEL)
        else {
            return Self::unavailable("no 'Surface' label");
        };

        let Some(value) = Self::next_element_sibling(label) else {
            return Self::unavailable("'Surface' label has no value next to it");
        };

        let surface = element_text(value);
        if surface.is_empty() {
            return Self::unavailable("surface value is empty");
        }

        debug!("Surface: {}", surface);
        Extraction::Ok(surface)
    }

    fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
        element.next_siblings().find_map(ElementRef::wrap)
    }

    fn unavailable(reason: &str) -> Extraction<String> {
        warn!("Surface unavailable: {}", reason);
        Extraction::degraded(SURFACE_UNAVAILABLE.to_string(), reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overview(details: &str) -> String {
        format!(
            r#"<html><body><div class="tourn_details">{}</div></body></html>"#,
            details
        )
    }

    #[test]
    fn test_surface_from_label_sibling() {
        let extractor = SurfaceExtractor::new().unwrap();
        let markup = overview(
            r#"<div class="td_left">
                 <span>Location</span> <span>Paris, France</span>
               </div>
               <div class="td_right">
                 <span>Surface</span>
                 <span> Clay </span>
               </div>"#,
        );

        assert_eq!(extractor.parse(&markup), Extraction::Ok("Clay".to_string()));
    }

    #[test]
    fn test_missing_label_is_unavailable() {
        let extractor = SurfaceExtractor::new().unwrap();
        let markup = overview("<span>Location</span><span>Paris, France</span>");

        let outcome = extractor.parse(&markup);
        assert!(matches!(outcome, Extraction::Degraded { .. }));
        assert_eq!(outcome.value_or(String::new()), SURFACE_UNAVAILABLE);
    }

    #[test]
    fn test_label_without_sibling_is_unavailable() {
        let extractor = SurfaceExtractor::new().unwrap();
        let markup = overview("<div><span>Surface</span></div>");
        assert_eq!(extractor.parse(&markup).value_or(String::new()), SURFACE_UNAVAILABLE);
    }

    #[test]
    fn test_label_match_is_exact() {
        let extractor = SurfaceExtractor::new().unwrap();
        let markup = overview("<span>Surface type</span><span>Hard</span>");
        assert_eq!(extractor.parse(&markup).value_or(String::new()), SURFACE_UNAVAILABLE);
    }

    #[test]
    fn test_page_without_details_is_unavailable() {
        let extractor = SurfaceExtractor::new().unwrap();
        let markup = "<html><body><span>Surface</span><span>Grass</span></body></html>";
        let outcome = extractor.parse(markup);
        assert_eq!(outcome.value_or(String::new()), SURFACE_UNAVAILABLE);
    }
}
