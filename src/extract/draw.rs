use log::{debug, info};
use scraper::{ElementRef, Html, Selector};

use super::names::{NameDeriver, NameOutcome, NameSource};
use super::{element_text, selector, Extraction};
use crate::browser::{PageDriver, DRAW_MARKER};
use crate::domain::Match;
use crate::errors::ScrapeError;

/// Heuristics tuned to the current draw markup
#[derive(Debug, Clone)]
pub struct DrawHeuristics {
    pub names: NameDeriver,
    /// An entry with a single name slot is a player waiting on an unknown opponent (or a bye)
    pub single_slot_is_bye: bool,
}

impl Default for DrawHeuristics {
    fn default() -> Self {
        Self {
            names: NameDeriver::default(),
            single_slot_is_bye: true,
        }
    }
}

/// Why an entry did not become a [`Match`]
#[derive(Debug, Clone, PartialEq, Eq)]
enum Skip {
    Completed,
    NoNameSlots,
    Placeholder { player1: String, player2: String },
}

struct DrawSelectors {
    item: Selector,
    player_info: Selector,
    winner: Selector,
    name: Selector,
    anchor: Selector,
}

impl DrawSelectors {
    fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            item: selector("div.draw-item")?,
            player_info: selector("div.player-info")?,
            winner: selector("div.winner")?,
            name: selector("div.name")?,
            anchor: selector("a")?,
        })
    }
}

/// Collects the not-yet-played matches of a draw page
pub struct DrawExtractor {
    heuristics: DrawHeuristics,
    selectors: DrawSelectors,
}

impl DrawExtractor {
    pub fn new(heuristics: DrawHeuristics) -> Result<Self, ScrapeError> {
        Ok(Self {
            heuristics,
            selectors: DrawSelectors::new()?,
        })
    }

    pub fn extract(&self, driver: &mut dyn PageDriver, draw_url: &str) -> Extraction<Vec<Match>> {
        match driver.navigate(draw_url, &DRAW_MARKER) {
            Ok(markup) => Extraction::Ok(self.parse(&markup)),
            Err(e) => Extraction::Fatal(e),
        }
    }

    /// Matches with two concrete players and no winner, in page order
    pub fn parse(&self, markup: &str) -> Vec<Match> {
        let document = Html::parse_document(markup);
        let mut matches = Vec::new();
        let mut skipped = 0;

        for (index, item) in document.select(&self.selectors.item).enumerate() {
            match self.parse_entry(item) {
                Ok(game) => matches.push(game),
                Err(skip) => {
                    debug!("Draw entry {} skipped: {:?}", index, skip);
                    skipped += 1;
                }
            }
        }

        info!("  → {} incomplete matches ({} entries skipped)", matches.len(), skipped);
        matches
    }

    fn parse_entry(&self, item: ElementRef<'_>) -> Result<Match, Skip> {
        if self.has_winner(item) {
            return Err(Skip::Completed);
        }

        let slots: Vec<ElementRef<'_>> = item.select(&self.selectors.name).collect();
        let (player1, player2) = match slots.as_slice() {
            [] => return Err(Skip::NoNameSlots),
            [only] => (self.slot_name(*only), self.missing_opponent()),
            [first, second, ..] => (self.slot_name(*first), self.slot_name(*second)),
        };

        match (player1.clone().concrete(), player2.clone().concrete()) {
            (Some(player1), Some(player2)) => Ok(Match { player1, player2 }),
            _ => Err(Skip::Placeholder {
                player1: player1.as_str().to_string(),
                player2: player2.as_str().to_string(),
            }),
        }
    }

    fn has_winner(&self, item: ElementRef<'_>) -> bool {
        item.select(&self.selectors.player_info)
            .any(|info| info.select(&self.selectors.winner).next().is_some())
    }

    fn slot_name(&self, slot: ElementRef<'_>) -> NameOutcome {
        let Some(anchor) = slot.select(&self.selectors.anchor).next() else {
            return NameOutcome::Empty;
        };

        let text = element_text(anchor);
        let source = NameSource {
            href: anchor.value().attr("href"),
            text: &text,
        };
        self.heuristics.names.derive(Some(source))
    }

    fn missing_opponent(&self) -> NameOutcome {
        if self.heuristics.single_slot_is_bye {
            NameOutcome::bye()
        } else {
            NameOutcome::Empty
        }
    }
}
