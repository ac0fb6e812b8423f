use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serde_json::Value;

use crate::config::ServiceSettings;
use crate::domain::{ComparisonResponse, NormalizedComparisonRequest};
use crate::errors::ServiceError;
use crate::http::JsonClient;

/// Keys every comparison body must carry; the remaining stats default to `0`
const REQUIRED_KEYS: [&str; 2] = ["p1_rank", "p2_rank"];

/// Builds the head-to-head feature vector for two players
#[async_trait]
pub trait CompareService: Send + Sync {
    async fn compare(
        &self,
        request: &NormalizedComparisonRequest,
    ) -> Result<ComparisonResponse, ServiceError>;
}

/// Client of the players database service (`/players/compare/{name1}/{name2}`)
pub struct CompareClient {
    client: JsonClient,
    base_url: String,
}

impl CompareClient {
    pub fn new(settings: &ServiceSettings) -> Result<Self> {
        Ok(Self {
            client: JsonClient::new(&settings.user_agent, settings.timeout_secs)?,
            base_url: settings.compare_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_compare_url(&self, player1: &str, player2: &str) -> String {
        format!(
            "{}/players/compare/{}/{}",
            self.base_url,
            urlencoding::encode(player1),
            urlencoding::encode(player2)
        )
    }

    fn build_query(request: &NormalizedComparisonRequest) -> Vec<(&'static str, &str)> {
        let mut query = Vec::new();
        if let Some(surface) = request.surface_code.as_deref() {
            query.push(("surface", surface));
        }
        if let Some(tourney_type) = request.tourney_type_code.as_deref() {
            query.push(("tourney_type", tourney_type));
        }
        query
    }

    /// A 200 body only counts as a comparison when it is an object with the rank keys
    fn parse_comparison(url: &str, body: Value) -> Result<ComparisonResponse, ServiceError> {
        let decode_error = |reason: String| ServiceError::Decode {
            url: url.to_string(),
            reason,
        };

        let Some(fields) = body.as_object() else {
            return Err(decode_error(format!("expected a JSON object, got {}", body)));
        };

        if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !fields.contains_key(**key)) {
            return Err(decode_error(format!("comparison is missing '{}'", missing)));
        }

        serde_json::from_value(body).map_err(|e| decode_error(e.to_string()))
    }
}

#[async_trait]
impl CompareService for CompareClient {
    async fn compare(
        &self,
        request: &NormalizedComparisonRequest,
    ) -> Result<ComparisonResponse, ServiceError> {
        info!(
            "Requesting comparison for {} vs {}",
            request.player1_name, request.player2_name
        );

        let url = self.build_compare_url(&request.player1_name, &request.player2_name);
        let query = Self::build_query(request);
        let body: Value = self.client.get_json(&url, &query).await?;
        Self::parse_comparison(&url, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "http://db.local:8000/players/compare/A/B";

    #[test]
    fn test_names_are_percent_encoded() {
        let settings = ServiceSettings {
            compare_base_url: "http://db.local:8000/".to_string(),
            ..ServiceSettings::default()
        };
        let client = CompareClient::new(&settings).unwrap();

        assert_eq!(
            client.build_compare_url("Novak Djokovic", "Stan Wawrinka"),
            "http://db.local:8000/players/compare/Novak%20Djokovic/Stan%20Wawrinka"
        );
    }

    #[test]
    fn test_query_only_carries_known_codes() {
        let mut request = NormalizedComparisonRequest {
            player1_name: "A".to_string(),
            player2_name: "B".to_string(),
            tourney_type_code: Some("G".to_string()),
            surface_code: None,
        };
        assert_eq!(CompareClient::build_query(&request), vec![("tourney_type", "G")]);

        request.tourney_type_code = None;
        assert!(CompareClient::build_query(&request).is_empty());
    }

    #[test]
    fn test_bodies_without_ranks_are_rejected() {
        for body in [json!({}), json!([]), json!({"detail": "Player not found"}), json!(null)] {
            assert!(
                matches!(
                    CompareClient::parse_comparison(URL, body.clone()),
                    Err(ServiceError::Decode { .. })
                ),
                "accepted {}",
                body
            );
        }
    }

    #[test]
    fn test_missing_stats_default_to_zero() {
        let body = json!({"p1_rank": 3, "p2_rank": 11, "p1_h2h_won": 2});

        let comparison = CompareClient::parse_comparison(URL, body).unwrap();

        assert_eq!(comparison.p1_rank, 3.0);
        assert_eq!(comparison.p2_rank, 11.0);
        assert_eq!(comparison.p1_h2h_won, 2.0);
        assert_eq!(comparison.p2_surface_w_rate, 0.0);
    }
}
