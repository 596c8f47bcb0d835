pub mod board;

use std::fmt;

use tracing::{debug, warn};

use crate::chips::Chip;
use crate::service::{MteService, ServiceError, VariantScore};

pub use board::{ScoreBoard, ScoreTicket, SCORE_ERROR_TEXT, SCORE_ZERO_TEXT};

/// The aggregate exactly as the service returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreValue {
    pub overall: serde_json::Value,
    pub breakdown: Vec<VariantScore>,
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.overall {
            // Strings print bare, without JSON quotes
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreResult {
    /// No chips; the service was not contacted.
    Zero,
    Value(ScoreValue),
    Failed(ServiceError),
}

impl ScoreResult {
    pub fn is_failed(&self) -> bool {
        matches!(self, ScoreResult::Failed(_))
    }
}

pub struct ScoreClient<S> {
    service: S,
}

impl<S> ScoreClient<S>
where
    S: MteService,
{
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Sends the variant of every chip, in chip order.
    pub async fn compute(&self, chips: &[Chip]) -> ScoreResult {
        if chips.is_empty() {
            debug!("no chips, score is zero");
            return ScoreResult::Zero;
        }

        let variants: Vec<String> = chips
            .iter()
            .map(|c| c.path.variant().to_string())
            .collect();

        match self.service.calculate_mte(&variants).await {
            Ok(response) => ScoreResult::Value(ScoreValue {
                overall: response.overall_mte,
                breakdown: response.variants,
            }),
            Err(e) => {
                warn!("MTE calculation failed: {e}");
                ScoreResult::Failed(e)
            }
        }
    }
}
