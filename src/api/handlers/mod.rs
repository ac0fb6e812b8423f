use axum::Json;
use std::sync::Arc;

use crate::api::models::WelcomeMessage;
use crate::browser::SessionFactory;
use crate::services::{MatchPipeline, ScrapeOrchestrator};

pub mod forecast;
pub mod scrape;

pub struct AppState {
    pub scraper: Arc<ScrapeOrchestrator>,
    pub sessions: Arc<dyn SessionFactory>,
    pub pipeline: Arc<MatchPipeline>,
}

pub async fn root() -> Json<WelcomeMessage> {
    Json(WelcomeMessage {
        message: "Welcome to the ATP forecast API".to_string(),
    })
}
