use log::{info, warn};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::{element_text, selector};
use crate::config::category_for_badge;
use crate::domain::{Category, TournamentDescriptor, UNKNOWN_TOURNAMENT_NAME};
use crate::errors::ScrapeError;

const DRAW_LABEL: &str = "Draw";

/// Parses the scores landing page into tournament descriptors
pub struct TournamentListExtractor {
    origin: Url,
    block: Selector,
    title: Selector,
    badge: Selector,
    anchor: Selector,
}

impl TournamentListExtractor {
    pub fn new(site_origin: &str) -> Result<Self, ScrapeError> {
        let origin = Url::parse(site_origin).map_err(|e| {
            ScrapeError::Browser(format!("invalid site origin '{}': {}", site_origin, e))
        })?;

        Ok(Self {
            origin,
            block: selector("div.tournament--expanded")?,
            title: selector("h3.title")?,
            badge: selector("div.badge img")?,
            anchor: selector("a")?,
        })
    }

    /// One descriptor per tournament block, in page order. A page without
    /// blocks gives an empty list.
    pub fn extract(&self, markup: &str) -> Vec<TournamentDescriptor> {
        let document = Html::parse_document(markup);

        let descriptors: Vec<TournamentDescriptor> = document
            .select(&self.block)
            .map(|block| self.describe(block))
            .collect();

        info!("  → Found {} tournament blocks", descriptors.len());
        descriptors
    }

    fn describe(&self, block: ElementRef<'_>) -> TournamentDescriptor {
        let title = block.select(&self.title).next();

        let name = title
            .map(element_text)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_TOURNAMENT_NAME.to_string());

        let overview_url = title
            .and_then(|title| title.select(&self.anchor).next())
            .and_then(|anchor| self.absolute_href(anchor));

        let draw_url = block
            .select(&self.anchor)
            .find(|anchor| element_text(*anchor) == DRAW_LABEL)
            .and_then(|anchor| self.absolute_href(anchor));

        TournamentDescriptor {
            category: self.category(block),
            name,
            overview_url,
            draw_url,
        }
    }

    // --- Field Helpers ---

    fn category(&self, block: ElementRef<'_>) -> Category {
        block
            .select(&self.badge)
            .find_map(|img| img.value().attr("src"))
            .map(category_for_badge)
            .unwrap_or(Category::Unknown)
    }

    fn absolute_href(&self, anchor: ElementRef<'_>) -> Option<Url> {
        let href = anchor.value().attr("href")?.trim();
        if href.is_empty() {
            return None;
        }

        match self.origin.join(href) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Ignoring unusable link '{}': {}", href, e);
                None
            }
        }
    }
}
