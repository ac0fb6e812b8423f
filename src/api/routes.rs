use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{forecast::post_forecast, root, scrape::get_atp_matches, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/atp_matches", get(get_atp_matches))
        .route("/api/forecast", post(post_forecast))
        .with_state(state)
}
