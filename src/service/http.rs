//! `MteService` over HTTP with reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{CalculateRequest, CalculateResponse, MteService, ServiceError};
use crate::config::ServiceConfig;
use crate::types::{Candidate, CandidateQuery};

#[derive(Debug, Clone)]
pub struct HttpMteService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpMteService {
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidUrl(config.base_url.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded segments to the base path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ServiceError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MteService for HttpMteService {
    async fn candidates(&self, query: &CandidateQuery) -> Result<Vec<Candidate>, ServiceError> {
        let url = self.endpoint(&query.path_segments())?;
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn calculate_mte(&self, variants: &[String]) -> Result<CalculateResponse, ServiceError> {
        let url = self.endpoint(&["calculate_mte"])?;
        debug!("POST {url} ({} variants)", variants.len());

        let body = CalculateRequest {
            variants: variants.to_vec(),
        };
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(serde_json::to_vec(&body)?)
            .send()
            .await?;

        let parsed: CalculateResponse = Self::read_json(response).await?;
        if parsed.overall_mte.is_null() {
            return Err(ServiceError::MalformedBody("missing overall_mte".into()));
        }
        Ok(parsed)
    }
}
