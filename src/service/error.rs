use thiserror::Error;

/// Failures talking to the remote service. All are recoverable; nothing retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// A response arrived with a non-success status.
    #[error("service returned status {status}")]
    Status { status: u16 },

    /// A success response whose body could not be read as the expected JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("invalid service url: {0}")]
    InvalidUrl(String),
}

impl ServiceError {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedBody(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedBody(err.to_string())
    }
}

impl From<url::ParseError> for ServiceError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
