use serde::{Deserialize, Serialize};

/// One of the three cascading fields, ordered left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Module,
    Model,
    Variant,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Module, Level::Model, Level::Variant];

    pub fn index(self) -> usize {
        match self {
            Level::Module => 0,
            Level::Model => 1,
            Level::Variant => 2,
        }
    }

    pub fn next(self) -> Option<Level> {
        match self {
            Level::Module => Some(Level::Model),
            Level::Model => Some(Level::Variant),
            Level::Variant => None,
        }
    }

    pub fn previous(self) -> Option<Level> {
        match self {
            Level::Module => None,
            Level::Model => Some(Level::Module),
            Level::Variant => Some(Level::Model),
        }
    }
}

/// A labeled record returned in place of a plain name.
///
/// Only the name field matching the requested level is read; everything else
/// (e.g. the per-variant `MTE`) is carried along untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabeledCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A raw entry from a candidate listing: either a bare name or a labeled record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Candidate {
    Name(String),
    Labeled(LabeledCandidate),
}

impl Candidate {
    pub fn name(name: impl Into<String>) -> Self {
        Candidate::Name(name.into())
    }

    /// The string shown for this entry at `level`, if it has one.
    pub fn display_name(&self, level: Level) -> Option<&str> {
        match self {
            Candidate::Name(name) => Some(name.as_str()),
            Candidate::Labeled(record) => match level {
                Level::Module => record.module_name.as_deref(),
                Level::Model => record.model_name.as_deref(),
                Level::Variant => record.variant_name.as_deref(),
            },
        }
    }
}

/// Normalize a raw listing into display strings, preserving order.
///
/// Records lacking the level's name field are dropped.
pub fn normalize_candidates(level: Level, raw: &[Candidate]) -> Vec<String> {
    raw.iter()
        .filter_map(|c| c.display_name(level))
        .map(str::to_string)
        .collect()
}

/// Which listing to fetch from the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CandidateQuery {
    Modules,
    Models { module: String },
    Variants { model: String },
}

impl CandidateQuery {
    pub fn level(&self) -> Level {
        match self {
            CandidateQuery::Modules => Level::Module,
            CandidateQuery::Models { .. } => Level::Model,
            CandidateQuery::Variants { .. } => Level::Variant,
        }
    }

    /// Unencoded path segments, e.g. `["models", "Engine A"]`.
    pub fn path_segments(&self) -> Vec<&str> {
        match self {
            CandidateQuery::Modules => vec!["modules"],
            CandidateQuery::Models { module } => vec!["models", module.as_str()],
            CandidateQuery::Variants { model } => vec!["variants", model.as_str()],
        }
    }
}
