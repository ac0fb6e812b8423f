//! Player names from draw entries.
//!
//! Draw slots rarely show a full name: the visible text is usually an
//! abbreviation ("N. Djokovic") while the player link carries a slug
//! (`/en/players/novak-djokovic/d643/overview`). Names are derived by trying
//! each configured [`NameStrategy`] in order until one applies.

/// Placeholder for a slot whose player is not known yet
pub const TBA: &str = "TBA";

/// Placeholder for the missing opponent of a one-player entry
pub const BYE: &str = "(opponent unknown/BYE)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelKind {
    Tba,
    Qualifier,
    LuckyLoser,
    Bye,
}

/// Which path produced a slot's name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameOutcome {
    Derived(String),
    Sentinel { kind: SentinelKind, token: String },
    Empty,
}

impl NameOutcome {
    pub fn bye() -> Self {
        NameOutcome::Sentinel {
            kind: SentinelKind::Bye,
            token: BYE.to_string(),
        }
    }

    /// The name or placeholder as it would be displayed
    pub fn as_str(&self) -> &str {
        match self {
            NameOutcome::Derived(name) => name,
            NameOutcome::Sentinel { token, .. } => token,
            NameOutcome::Empty => "",
        }
    }

    pub fn concrete(self) -> Option<String> {
        match self {
            NameOutcome::Derived(name) if !name.is_empty() => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStrategy {
    /// Hyphenated path segment of the player link
    AnchorSlug,
    /// Text of the player link
    VisibleText,
}

/// What a name slot's player link offers
#[derive(Debug, Clone, Copy)]
pub struct NameSource<'a> {
    pub href: Option<&'a str>,
    pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct NameDeriver {
    strategies: Vec<NameStrategy>,
    /// Visible text containing a period ("J. Sinner") is already in display form
    keep_dotted_text: bool,
}

impl Default for NameDeriver {
    fn default() -> Self {
        Self {
            strategies: vec![NameStrategy::AnchorSlug, NameStrategy::VisibleText],
            keep_dotted_text: true,
        }
    }
}

impl NameDeriver {
    pub fn new(strategies: Vec<NameStrategy>) -> Self {
        Self {
            strategies,
            ..Self::default()
        }
    }

    pub fn keep_dotted_text(mut self, keep: bool) -> Self {
        self.keep_dotted_text = keep;
        self
    }

    /// `None` means the slot has no player link at all
    pub fn derive(&self, source: Option<NameSource<'_>>) -> NameOutcome {
        let Some(source) = source else {
            return NameOutcome::Empty;
        };

        self.strategies
            .iter()
            .find_map(|strategy| self.apply(*strategy, source))
            .unwrap_or(NameOutcome::Empty)
    }

    fn apply(&self, strategy: NameStrategy, source: NameSource<'_>) -> Option<NameOutcome> {
        match strategy {
            NameStrategy::AnchorSlug => source.href.and_then(find_slug).map(name_from_slug),
            NameStrategy::VisibleText => {
                let text = source.text.trim();
                if text.is_empty() {
                    return None;
                }
                if self.keep_dotted_text && text.contains('.') {
                    return Some(NameOutcome::Derived(text.to_string()));
                }
                Some(name_from_slug(text))
            }
        }
    }
}

/// Last path segment that looks like a `first-last` slug
pub fn find_slug(href: &str) -> Option<&str> {
    href.rsplit('/')
        .find(|part| part.chars().count() > 3 && part.contains('-'))
}

/// `roger-federer` → `Roger Federer`; placeholders come back upper-cased as sentinels
pub fn name_from_slug(slug: &str) -> NameOutcome {
    classify_placeholder(slug).unwrap_or_else(|| NameOutcome::Derived(title_case(slug)))
}

fn classify_placeholder(token: &str) -> Option<NameOutcome> {
    let upper = token.trim().to_uppercase();

    let kind = if upper == TBA {
        SentinelKind::Tba
    } else if upper.starts_with("QUALIFIER") {
        SentinelKind::Qualifier
    } else if upper.starts_with("LUCKY-LOSER") {
        SentinelKind::LuckyLoser
    } else {
        return None;
    };

    Some(NameOutcome::Sentinel { kind, token: upper })
}

fn title_case(slug: &str) -> String {
    slug.split(|c: char| c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
