pub mod models;

pub use models::{
    Category, ComparisonResponse, Match, MatchQuery, NormalizedComparisonRequest, PipelineResult,
    PipelineStage, PredictionOutput, PredictionResponse, TournamentDescriptor, TournamentResult,
    SURFACE_UNAVAILABLE, UNKNOWN_TOURNAMENT_NAME,
};
