use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ChipId, Level};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChipError {
    #[error("{0:?} must not be empty")]
    EmptyField(Level),
}

/// A completed (module, model, variant) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantPath {
    module: String,
    model: String,
    variant: String,
}

impl VariantPath {
    /// All three parts must be non-empty.
    pub fn new(
        module: impl Into<String>,
        model: impl Into<String>,
        variant: impl Into<String>,
    ) -> Result<Self, ChipError> {
        let module = module.into();
        let model = model.into();
        let variant = variant.into();

        for (level, value) in [
            (Level::Module, &module),
            (Level::Model, &model),
            (Level::Variant, &variant),
        ] {
            if value.is_empty() {
                return Err(ChipError::EmptyField(level));
            }
        }

        Ok(VariantPath {
            module,
            model,
            variant,
        })
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }
}

impl fmt::Display for VariantPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {} > {}", self.module, self.model, self.variant)
    }
}

/// One removable selection unit. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub id: ChipId,
    pub path: VariantPath,
}

impl Chip {
    /// Display text, `module > model > variant`.
    pub fn label(&self) -> String {
        self.path.to_string()
    }
}
