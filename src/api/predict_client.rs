use anyhow::Result;
use async_trait::async_trait;
use log::info;

use crate::config::ServiceSettings;
use crate::domain::{ComparisonResponse, PredictionResponse};
use crate::errors::ServiceError;
use crate::http::JsonClient;

const PREDICT_PATH: &str = "/api/v1/predict";

/// Turns a head-to-head feature vector into win probabilities
#[async_trait]
pub trait PredictService: Send + Sync {
    async fn predict(
        &self,
        features: &ComparisonResponse,
    ) -> Result<PredictionResponse, ServiceError>;
}

/// Client of the model service
pub struct PredictClient {
    client: JsonClient,
    endpoint: String,
}

impl PredictClient {
    pub fn new(settings: &ServiceSettings) -> Result<Self> {
        Ok(Self {
            client: JsonClient::new(&settings.user_agent, settings.timeout_secs)?,
            endpoint: format!(
                "{}{}",
                settings.predict_base_url.trim_end_matches('/'),
                PREDICT_PATH
            ),
        })
    }

    /// The model answers `200` even when it could not predict; such envelopes count as failures
    fn accept(response: PredictionResponse) -> Result<PredictionResponse, ServiceError> {
        if response.success && response.data.is_some() {
            return Ok(response);
        }

        let reason = response
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or(response.message);
        Err(ServiceError::Rejected(reason))
    }
}

#[async_trait]
impl PredictService for PredictClient {
    async fn predict(
        &self,
        features: &ComparisonResponse,
    ) -> Result<PredictionResponse, ServiceError> {
        info!("Requesting model prediction");
        let response: PredictionResponse = self.client.post_json(&self.endpoint, features).await?;
        Self::accept(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionOutput;

    #[test]
    fn test_endpoint_joins_base_url() {
        let settings = ServiceSettings {
            predict_base_url: "http://model.local:8001/".to_string(),
            ..ServiceSettings::default()
        };
        let client = PredictClient::new(&settings).unwrap();
        assert_eq!(client.endpoint, "http://model.local:8001/api/v1/predict");
    }

    #[test]
    fn test_unsuccessful_envelope_is_rejected() {
        let response = PredictionResponse {
            success: false,
            message: "Model could not be loaded".to_string(),
            data: None,
            error: Some("Failed to load model".to_string()),
        };

        match PredictClient::accept(response) {
            Err(ServiceError::Rejected(reason)) => assert_eq!(reason, "Failed to load model"),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_successful_envelope_is_accepted() {
        let response = PredictionResponse {
            success: true,
            message: "Prediction completed successfully".to_string(),
            data: Some(PredictionOutput {
                prediction: 1,
                probability_p1_wins: 0.38,
                probability_p2_wins: 0.62,
            }),
            error: None,
        };

        assert_eq!(PredictClient::accept(response.clone()).unwrap(), response);
    }
}
