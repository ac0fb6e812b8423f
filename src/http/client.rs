use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::errors::ServiceError;

/// HTTP client for JSON services, every request bounded by the same timeout
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: Client,
}

impl JsonClient {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        Ok(Self { client })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ServiceError> {
        debug!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| Self::classify(url, e))?;

        Self::read_json(url, response).await
    }

    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| Self::classify(url, e))?;

        Self::read_json(url, response).await
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn read_json<T: DeserializeOwned>(
        url: &str,
        response: Response,
    ) -> Result<T, ServiceError> {
        let status = response.status();
        let body = response.bytes().await.map_err(|e| Self::classify(url, e))?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: Self::snippet(&body),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ServiceError::Decode {
            url: url.to_string(),
            reason: format!("{} (body starts with: {})", e, Self::snippet(&body)),
        })
    }

    fn classify(url: &str, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout { url: url.to_string() }
        } else if err.is_decode() {
            ServiceError::Decode {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            ServiceError::Transport {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }

    fn snippet(body: &[u8]) -> String {
        String::from_utf8_lossy(body).chars().take(200).collect()
    }
}
