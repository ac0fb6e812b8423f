use axum::{extract::State, Json};
use std::sync::Arc;

use super::AppState;
use crate::domain::{MatchQuery, PipelineResult};

/// Staged failures are reported inside the result, not as an HTTP error
pub async fn post_forecast(
    State(state): State<Arc<AppState>>,
    Json(query): Json<MatchQuery>,
) -> Json<PipelineResult> {
    Json(state.pipeline.run(query).await)
}
