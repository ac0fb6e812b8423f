use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, info};
use std::sync::Arc;

use super::AppState;
use crate::api::models::ErrorBody;

/// Run one scrape pass. The browser blocks, so it runs on the blocking pool.
pub async fn get_atp_matches(State(state): State<Arc<AppState>>) -> Response {
    info!("Scrape requested");
    let scraper = Arc::clone(&state.scraper);
    let sessions = Arc::clone(&state.sessions);

    let outcome = tokio::task::spawn_blocking(move || scraper.run(sessions.as_ref())).await;

    match outcome {
        Ok(Ok(results)) if results.is_empty() => StatusCode::NO_CONTENT.into_response(),
        Ok(Ok(results)) => (StatusCode::OK, Json(results)).into_response(),
        Ok(Err(e)) => {
            error!("Scrape failed: {}", e);
            failure(e.to_string())
        }
        Err(e) => {
            error!("Scrape task crashed: {}", e);
            failure(e.to_string())
        }
    }
}

fn failure(details: String) -> Response {
    let body = ErrorBody {
        error: "An error occurred while scraping".to_string(),
        details,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
