use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::api::{CompareClient, CompareService, PredictClient, PredictService};
use crate::config::{surface_code, tourney_type_code, ServiceSettings};
use crate::domain::{MatchQuery, NormalizedComparisonRequest, PipelineResult, PipelineStage};

/// Forecasts one match: normalize → compare → predict.
///
/// Each stage only runs when the previous one succeeded. Failures never escape
/// as errors; they end up in [`PipelineResult::error`].
pub struct MatchPipeline {
    compare: Arc<dyn CompareService>,
    predict: Arc<dyn PredictService>,
}

impl MatchPipeline {
    pub fn new(compare: Arc<dyn CompareService>, predict: Arc<dyn PredictService>) -> Self {
        Self { compare, predict }
    }

    /// Pipeline talking to the real compare and predict services
    pub fn from_settings(settings: &ServiceSettings) -> Result<Self> {
        Ok(Self::new(
            Arc::new(CompareClient::new(settings)?),
            Arc::new(PredictClient::new(settings)?),
        ))
    }

    pub async fn run(&self, query: MatchQuery) -> PipelineResult {
        info!("Forecasting {} vs {}", query.player1_name, query.player2_name);

        let request = Self::normalize(&query);
        Self::transition(PipelineStage::Start, PipelineStage::Normalized);

        if request.player1_name.is_empty() || request.player2_name.is_empty() {
            return Self::fail_compare(query, "player names are missing".to_string());
        }

        let comparison = match self.compare.compare(&request).await {
            Ok(comparison) => {
                Self::transition(PipelineStage::Normalized, PipelineStage::Compared);
                comparison
            }
            Err(e) => return Self::fail_compare(query, e.to_string()),
        };

        match self.predict.predict(&comparison).await {
            Ok(prediction) => {
                info!("Forecast for {} vs {} completed", query.player1_name, query.player2_name);
                PipelineResult::predicted(query, comparison, prediction)
            }
            Err(e) => {
                let message = format!("Failed to get the match prediction: {}", e);
                error!("{}", message);
                PipelineResult::predict_failed(query, comparison, message)
            }
        }
    }

    /// Translate the site vocabulary into compare-service codes. Unknown labels
    /// become `None` rather than a guess.
    pub fn normalize(query: &MatchQuery) -> NormalizedComparisonRequest {
        let tourney_type_code = query.tourney_type.as_deref().and_then(|label| {
            let code = tourney_type_code(label);
            if code.is_none() {
                warn!("Tournament type '{}' has no compare code; sending none", label);
            }
            code
        });

        let surface_code = query.surface.as_deref().and_then(|label| {
            let code = surface_code(label);
            if code.is_none() {
                warn!("Surface '{}' has no compare code; sending none", label);
            }
            code
        });

        NormalizedComparisonRequest {
            player1_name: query.player1_name.trim().to_string(),
            player2_name: query.player2_name.trim().to_string(),
            tourney_type_code: tourney_type_code.map(str::to_string),
            surface_code: surface_code.map(str::to_string),
        }
    }

    fn transition(from: PipelineStage, to: PipelineStage) {
        debug!("Pipeline {:?} -> {:?}", from, to);
    }

    fn fail_compare(query: MatchQuery, reason: String) -> PipelineResult {
        let message = format!("Failed to get the match comparison: {}", reason);
        error!("{}", message);
        PipelineResult::compare_failed(query, message)
    }
}

/// Run independent pipelines concurrently, at most `concurrency` at a time.
/// Results come back in input order.
pub async fn forecast_all(
    pipeline: Arc<MatchPipeline>,
    queries: Vec<MatchQuery>,
    concurrency: usize,
) -> Vec<PipelineResult> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (index, query) in queries.into_iter().enumerate() {
        let pipeline = Arc::clone(&pipeline);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            (index, pipeline.run(query).await)
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(e) => error!("Forecast task failed: {}", e),
        }
    }

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}
