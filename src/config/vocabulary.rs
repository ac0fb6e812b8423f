use crate::domain::Category;

/// Badge image suffixes used on the scores page, checked in order.
///
/// The badge `src` looks like `/assets/atpwt/images/tournament/badges/categorystamps_500.png`.
/// Only the suffix identifies the category, so more specific suffixes must come
/// before shorter ones they could overlap with.
pub const BADGE_CATEGORIES: &[(&str, Category)] = &[
    ("_gs.png", Category::GrandSlam),
    ("_ms1000.png", Category::Masters1000),
    ("_500.png", Category::Atp500),
    ("_250.png", Category::Atp250),
    ("_atpfinals.png", Category::Finals),
    ("_nextgen.png", Category::NextGenFinals),
    ("_unitedcup.png", Category::UnitedCup),
    ("_challenger.png", Category::Challenger),
    ("_atpcup.png", Category::Cup),
];

/// Tournament type labels understood by the compare service (`tourney_type` query parameter).
///
/// The first block is the vocabulary of the upcoming-matches feed, the second one the
/// category labels produced by the scraper.
pub const TOURNEY_TYPE_CODES: &[(&str, &str)] = &[
    ("ATP 250", "A"),
    ("ATP 500", "M"),
    ("ATP 1000", "B"),
    ("Grand Slam", "G"),
    ("Challenger", "C"),
    ("Future", "F"),
    // scraper category labels
    ("ATP Masters 1000", "B"),
    ("ATP Challenger Tour", "C"),
];

/// Surface labels understood by the compare service (`surface` query parameter)
pub const SURFACE_CODES: &[(&str, &str)] = &[
    ("Grass", "grass"),
    ("Hard", "hard"),
    ("Clay", "clay"),
    ("Carpet", "carpet"),
];

/// Resolve a badge image `src` to its category; unmatched badges are `Unknown`
pub fn category_for_badge(src: &str) -> Category {
    BADGE_CATEGORIES
        .iter()
        .find(|(suffix, _)| src.contains(suffix))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Unknown)
}

pub fn tourney_type_code(label: &str) -> Option<&'static str> {
    lookup(TOURNEY_TYPE_CODES, label)
}

pub fn surface_code(label: &str) -> Option<&'static str> {
    lookup(SURFACE_CODES, label)
}

fn lookup(table: &'static [(&'static str, &'static str)], label: &str) -> Option<&'static str> {
    let label = label.trim();
    table
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, code)| *code)
}
