use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Surface reported when the overview page could not be read
pub const SURFACE_UNAVAILABLE: &str = "unavailable";

/// Tournament name reported when the block has no title
pub const UNKNOWN_TOURNAMENT_NAME: &str = "Unknown name";

/// Tournament category, resolved from the badge shown next to each tournament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Grand Slam")]
    GrandSlam,
    #[serde(rename = "ATP Masters 1000")]
    Masters1000,
    #[serde(rename = "ATP 500")]
    Atp500,
    #[serde(rename = "ATP 250")]
    Atp250,
    #[serde(rename = "ATP Finals")]
    Finals,
    #[serde(rename = "Next Gen ATP Finals")]
    NextGenFinals,
    #[serde(rename = "United Cup")]
    UnitedCup,
    #[serde(rename = "ATP Challenger Tour")]
    Challenger,
    #[serde(rename = "ATP Cup")]
    Cup,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::GrandSlam => "Grand Slam",
            Category::Masters1000 => "ATP Masters 1000",
            Category::Atp500 => "ATP 500",
            Category::Atp250 => "ATP 250",
            Category::Finals => "ATP Finals",
            Category::NextGenFinals => "Next Gen ATP Finals",
            Category::UnitedCup => "United Cup",
            Category::Challenger => "ATP Challenger Tour",
            Category::Cup => "ATP Cup",
            Category::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One tournament block of the scores landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentDescriptor {
    pub name: String,
    pub category: Category,
    pub overview_url: Option<Url>,
    pub draw_url: Option<Url>,
}

/// Draw entry with two known players and no winner yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub player1: String,
    pub player2: String,
}

impl Match {
    pub fn new(player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self {
            player1: player1.into(),
            player2: player2.into(),
        }
    }
}

/// Everything one scrape pass learned about a tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentResult {
    pub tournament_name: String,
    pub category: Category,
    pub surface: String,
    pub incomplete_matches: Vec<Match>,
}

impl TournamentResult {
    pub fn has_surface(&self) -> bool {
        self.surface != SURFACE_UNAVAILABLE
    }
}

/// Input of the forecast pipeline, in the vocabulary of the site the match came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchQuery {
    pub player1_name: String,
    pub player2_name: String,
    #[serde(default)]
    pub tourney_type: Option<String>,
    #[serde(default)]
    pub surface: Option<String>,
    #[serde(default)]
    pub snapshot_date: Option<NaiveDate>,
}

impl MatchQuery {
    /// Build a query for a scraped match, carrying its tournament's category and surface
    pub fn from_scraped(
        tournament: &TournamentResult,
        game: &Match,
        snapshot_date: NaiveDate,
    ) -> Self {
        let tourney_type = match tournament.category {
            Category::Unknown => None,
            category => Some(category.label().to_string()),
        };
        let surface = tournament
            .has_surface()
            .then(|| tournament.surface.clone());

        Self {
            player1_name: game.player1.clone(),
            player2_name: game.player2.clone(),
            tourney_type,
            surface,
            snapshot_date: Some(snapshot_date),
        }
    }
}

/// Pipeline input translated to the compare service's codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedComparisonRequest {
    pub player1_name: String,
    pub player2_name: String,
    pub tourney_type_code: Option<String>,
    pub surface_code: Option<String>,
}

// --- Service Payloads ---

/// Head-to-head feature vector returned by the compare service.
///
/// The same document is posted as-is to the predict service. Stats the compare
/// service has no data for are sent as `0`, and absent keys fall back to `0` as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonResponse {
    pub p1_age: f64,
    pub p2_age: f64,
    pub p1_ht: f64,
    pub p2_ht: f64,
    pub p1_hand_encoded: i64,
    pub p2_hand_encoded: i64,
    pub p1_rank: f64,
    pub p2_rank: f64,
    pub p1_min_rank: f64,
    pub p2_min_rank: f64,
    #[serde(rename = "p1_pct_1stIn")]
    pub p1_pct_1st_in: f64,
    #[serde(rename = "p2_pct_1stIn")]
    pub p2_pct_1st_in: f64,
    #[serde(rename = "p1_pct_1stWon")]
    pub p1_pct_1st_won: f64,
    #[serde(rename = "p2_pct_1stWon")]
    pub p2_pct_1st_won: f64,
    #[serde(rename = "p1_pct_2ndWon")]
    pub p1_pct_2nd_won: f64,
    #[serde(rename = "p2_pct_2ndWon")]
    pub p2_pct_2nd_won: f64,
    #[serde(rename = "p1_pct_SvPtsWon")]
    pub p1_pct_sv_pts_won: f64,
    #[serde(rename = "p2_pct_SvPtsWon")]
    pub p2_pct_sv_pts_won: f64,
    #[serde(rename = "p1_pct_bpConv")]
    pub p1_pct_bp_conv: f64,
    #[serde(rename = "p2_pct_bpConv")]
    pub p2_pct_bp_conv: f64,
    #[serde(rename = "p1_pct_bpSaved")]
    pub p1_pct_bp_saved: f64,
    #[serde(rename = "p2_pct_bpSaved")]
    pub p2_pct_bp_saved: f64,
    #[serde(rename = "p1_pct_1stRetPtsWon")]
    pub p1_pct_1st_ret_pts_won: f64,
    #[serde(rename = "p2_pct_1stRetPtsWon")]
    pub p2_pct_1st_ret_pts_won: f64,
    #[serde(rename = "p1_pct_2ndRetPtsWon")]
    pub p1_pct_2nd_ret_pts_won: f64,
    #[serde(rename = "p2_pct_2ndRetPtsWon")]
    pub p2_pct_2nd_ret_pts_won: f64,
    pub p1_h2h_won: f64,
    pub p2_h2h_won: f64,
    #[serde(rename = "p1_recPerf")]
    pub p1_rec_perf: f64,
    #[serde(rename = "p2_recPerf")]
    pub p2_rec_perf: f64,
    #[serde(rename = "p1_surface_wRate")]
    pub p1_surface_w_rate: f64,
    #[serde(rename = "p2_surface_wRate")]
    pub p2_surface_w_rate: f64,
    #[serde(rename = "p1_tourney_wRate")]
    pub p1_tourney_w_rate: f64,
    #[serde(rename = "p2_tourney_wRate")]
    pub p2_tourney_w_rate: f64,
}

/// Envelope returned by the predict service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<PredictionOutput>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutput {
    /// 0 when player 1 is expected to win, 1 for player 2
    pub prediction: u8,
    pub probability_p1_wins: f64,
    pub probability_p2_wins: f64,
}

impl PredictionOutput {
    pub fn favourite<'a>(&self, query: &'a MatchQuery) -> &'a str {
        if self.prediction == 0 {
            &query.player1_name
        } else {
            &query.player2_name
        }
    }

    pub fn favourite_probability(&self) -> f64 {
        if self.prediction == 0 {
            self.probability_p1_wins
        } else {
            self.probability_p2_wins
        }
    }
}

// --- Pipeline Outcome ---

/// States of the per-match forecast pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Start,
    Normalized,
    Compared,
    Predicted,
    CompareFailed,
    PredictFailed,
}

impl PipelineStage {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PipelineStage::Predicted | PipelineStage::CompareFailed | PipelineStage::PredictFailed
        )
    }
}

/// Terminal record of one pipeline run.
///
/// Built only through the stage constructors below, so a failed stage always
/// carries an error and never a payload from a later stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    #[serde(rename = "match")]
    pub match_query: MatchQuery,
    pub stage: PipelineStage,
    pub comparison: Option<ComparisonResponse>,
    pub prediction: Option<PredictionResponse>,
    pub error: Option<String>,
}

impl PipelineResult {
    pub fn compare_failed(match_query: MatchQuery, error: String) -> Self {
        Self {
            match_query,
            stage: PipelineStage::CompareFailed,
            comparison: None,
            prediction: None,
            error: Some(error),
        }
    }

    pub fn predict_failed(
        match_query: MatchQuery,
        comparison: ComparisonResponse,
        error: String,
    ) -> Self {
        Self {
            match_query,
            stage: PipelineStage::PredictFailed,
            comparison: Some(comparison),
            prediction: None,
            error: Some(error),
        }
    }

    pub fn predicted(
        match_query: MatchQuery,
        comparison: ComparisonResponse,
        prediction: PredictionResponse,
    ) -> Self {
        Self {
            match_query,
            stage: PipelineStage::Predicted,
            comparison: Some(comparison),
            prediction: Some(prediction),
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.stage == PipelineStage::Predicted
    }
}
