use anyhow::{Context, Result};
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::browser::ChromeSessionFactory;
use crate::config::AppConfig;
use crate::services::{MatchPipeline, ScrapeOrchestrator};

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let state = Arc::new(self.build_state()?);

        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    fn build_state(&self) -> Result<AppState> {
        let scraper = ScrapeOrchestrator::new(self.config.browser.clone())
            .context("Failed to prepare the scraper")?;
        let pipeline = MatchPipeline::from_settings(&self.config.services)?;

        Ok(AppState {
            scraper: Arc::new(scraper),
            sessions: Arc::new(ChromeSessionFactory::new(self.config.browser.clone())),
            pipeline: Arc::new(pipeline),
        })
    }
}
