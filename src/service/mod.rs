//! The remote catalog and scoring service, as consumed by the page.

pub mod error;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{Candidate, CandidateQuery};

pub use error::ServiceError;
pub use http::HttpMteService;

/// Body of `POST /calculate_mte`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub variants: Vec<String>,
}

/// Per-variant contribution reported alongside the total.
///
/// Informational only; both fields are kept as loosely as they arrive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantScore {
    #[serde(default)]
    pub variant_name: Option<String>,
    #[serde(rename = "MTE", default)]
    pub mte: serde_json::Value,
}

/// Response of `POST /calculate_mte`.
///
/// `overall_mte` is kept exactly as the service sent it. The breakdown never
/// fails the response: a missing or non-array `variants` is empty, and
/// entries that are not objects of the expected shape are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub overall_mte: serde_json::Value,
    #[serde(default, deserialize_with = "lenient_breakdown")]
    pub variants: Vec<VariantScore>,
}

fn lenient_breakdown<'de, D>(deserializer: D) -> Result<Vec<VariantScore>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(entries) = raw else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

#[async_trait]
pub trait MteService: Send + Sync {
    /// `GET /modules`, `GET /models/{module}` or `GET /variants/{model}`.
    async fn candidates(&self, query: &CandidateQuery) -> Result<Vec<Candidate>, ServiceError>;

    /// `POST /calculate_mte`.
    async fn calculate_mte(&self, variants: &[String]) -> Result<CalculateResponse, ServiceError>;
}
