use serde::Serialize;

use crate::suggest::Suggestions;
use crate::types::{Level, RequestToken};

/// Where the cascade currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CascadePhase {
    Empty,
    ModuleChosen,
    ModelChosen,
    /// A variant was just turned into a chip; module and model stay committed.
    VariantChosen,
}

/// Input text, committed value, candidates and suggestions for one field.
#[derive(Debug, Clone)]
pub struct FieldState {
    level: Level,
    pub(crate) text: String,
    pub(crate) committed: Option<String>,
    pub(crate) enabled: bool,
    pub(crate) candidates: Vec<String>,
    pub(crate) suggestions: Suggestions,
    pub(crate) latest_token: RequestToken,
}

impl FieldState {
    pub(crate) fn new(level: Level, enabled: bool) -> Self {
        Self {
            level,
            text: String::new(),
            committed: None,
            enabled,
            candidates: Vec::new(),
            suggestions: Suggestions::hidden(),
            latest_token: RequestToken::default(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// What the input box shows.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn committed(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    pub fn latest_token(&self) -> RequestToken {
        self.latest_token
    }

    /// Drop text, value and candidates, and orphan any fetch in flight.
    pub(crate) fn reset(&mut self, enabled: bool) {
        self.text.clear();
        self.committed = None;
        self.enabled = enabled;
        self.candidates.clear();
        self.suggestions = Suggestions::hidden();
        self.latest_token = self.latest_token.next();
    }

    pub(crate) fn issue_token(&mut self) -> RequestToken {
        self.latest_token = self.latest_token.next();
        self.latest_token
    }
}
