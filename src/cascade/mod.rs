//! The module → model → variant cascade.
//!
//! Network work is split in two phases so nothing holds the controller while
//! a fetch is pending: a selection returns a [`FetchTicket`], the caller
//! resolves it against an [`MteService`](crate::service::MteService), and the
//! result is handed back through [`CascadeController::apply_candidates`].
//! Every ticket carries a per-field token; only the newest one may apply.

pub mod state;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::chips::{ChipError, VariantPath};
use crate::service::ServiceError;
use crate::suggest::{CaseInsensitiveMatcher, Matcher, SuggestionIndex, Suggestions};
use crate::types::{normalize_candidates, Candidate, CandidateQuery, Level, RequestToken};

pub use state::{CascadePhase, FieldState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CascadeError {
    #[error("{0:?} field is disabled")]
    LevelDisabled(Level),
    #[error("Selected value must not be empty")]
    EmptyValue,
    #[error("Invalid chip: {0}")]
    InvalidChip(#[from] ChipError),
}

/// A candidate fetch the caller must perform and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub query: CandidateQuery,
    pub token: RequestToken,
}

impl FetchTicket {
    pub fn level(&self) -> Level {
        self.query.level()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The next level was opened and needs its candidates.
    Fetch(FetchTicket),
    /// A variant completed a triple.
    Completed(VariantPath),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied { count: usize },
    /// The fetch failed; the field keeps working with no candidates.
    Failed,
    /// A newer fetch was issued for the field; the response was dropped.
    Stale,
}

pub struct CascadeController<M = CaseInsensitiveMatcher> {
    index: SuggestionIndex<M>,
    fields: [FieldState; 3],
    phase: CascadePhase,
}

impl Default for CascadeController<CaseInsensitiveMatcher> {
    fn default() -> Self {
        Self::new(SuggestionIndex::default())
    }
}

impl<M> CascadeController<M>
where
    M: Matcher,
{
    pub fn new(index: SuggestionIndex<M>) -> Self {
        Self {
            index,
            fields: [
                FieldState::new(Level::Module, true),
                FieldState::new(Level::Model, false),
                FieldState::new(Level::Variant, false),
            ],
            phase: CascadePhase::Empty,
        }
    }

    pub fn phase(&self) -> CascadePhase {
        self.phase
    }

    pub fn field(&self, level: Level) -> &FieldState {
        &self.fields[level.index()]
    }

    fn field_mut(&mut self, level: Level) -> &mut FieldState {
        &mut self.fields[level.index()]
    }

    /// Ticket for the initial module listing.
    pub fn load_modules(&mut self) -> FetchTicket {
        self.issue(CandidateQuery::Modules)
    }

    fn issue(&mut self, query: CandidateQuery) -> FetchTicket {
        let token = self.field_mut(query.level()).issue_token();
        debug!("issued {:?} fetch #{}", query, token.get());
        FetchTicket { query, token }
    }

    /// Record typed text and refilter. Input on a disabled field is ignored.
    pub fn query_changed(&mut self, level: Level, text: &str) -> &Suggestions {
        let index = &self.index;
        let field = &mut self.fields[level.index()];
        if !field.enabled {
            debug!("ignoring input on disabled {level:?} field");
            field.suggestions = Suggestions::hidden();
            return &field.suggestions;
        }

        field.text = text.to_string();
        field.suggestions = index.filter(&field.candidates, text);
        &field.suggestions
    }

    pub fn select(&mut self, level: Level, value: &str) -> Result<SelectOutcome, CascadeError> {
        match level {
            Level::Module => self.select_module(value).map(SelectOutcome::Fetch),
            Level::Model => self.select_model(value).map(SelectOutcome::Fetch),
            Level::Variant => self.select_variant(value).map(SelectOutcome::Completed),
        }
    }

    fn check_selectable(&self, level: Level, value: &str) -> Result<(), CascadeError> {
        if !self.field(level).enabled {
            return Err(CascadeError::LevelDisabled(level));
        }
        if value.trim().is_empty() {
            return Err(CascadeError::EmptyValue);
        }
        Ok(())
    }

    /// Commit a module, reopen Model empty, close Variant.
    ///
    /// Reselecting the committed module is a fresh cascade, not a no-op.
    pub fn select_module(&mut self, value: &str) -> Result<FetchTicket, CascadeError> {
        self.check_selectable(Level::Module, value)?;
        self.dismiss_suggestions();

        self.commit(Level::Module, value);
        self.field_mut(Level::Model).reset(true);
        self.field_mut(Level::Variant).reset(false);
        self.phase = CascadePhase::ModuleChosen;
        info!("module selected: {value}");

        debug_assert!(self.holds_enablement_invariant());
        Ok(self.issue(CandidateQuery::Models {
            module: value.to_string(),
        }))
    }

    /// Commit a model and reopen Variant empty.
    pub fn select_model(&mut self, value: &str) -> Result<FetchTicket, CascadeError> {
        self.check_selectable(Level::Model, value)?;
        self.dismiss_suggestions();

        self.commit(Level::Model, value);
        self.field_mut(Level::Variant).reset(true);
        self.phase = CascadePhase::ModelChosen;
        info!("model selected: {value}");

        debug_assert!(self.holds_enablement_invariant());
        Ok(self.issue(CandidateQuery::Variants {
            model: value.to_string(),
        }))
    }

    /// Complete a triple. Only the Variant input text is cleared; module and
    /// model stay committed so more variants can be added under them.
    pub fn select_variant(&mut self, value: &str) -> Result<VariantPath, CascadeError> {
        self.check_selectable(Level::Variant, value)?;
        self.dismiss_suggestions();

        let module = self.field(Level::Module).committed().unwrap_or_default();
        let model = self.field(Level::Model).committed().unwrap_or_default();
        let path = VariantPath::new(module, model, value)?;

        self.field_mut(Level::Variant).text.clear();
        self.phase = CascadePhase::VariantChosen;
        info!("variant completed: {path}");
        Ok(path)
    }

    fn commit(&mut self, level: Level, value: &str) {
        let field = self.field_mut(level);
        field.text = value.to_string();
        field.committed = Some(value.to_string());
    }

    /// Apply a fetch result if `ticket` is still the newest for its field.
    pub fn apply_candidates(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Candidate>, ServiceError>,
    ) -> ApplyOutcome {
        let level = ticket.level();
        let index = &self.index;
        let field = &mut self.fields[level.index()];

        if ticket.token != field.latest_token {
            debug!(
                "discarding stale {level:?} response #{} (latest #{})",
                ticket.token.get(),
                field.latest_token.get()
            );
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(raw) => {
                field.candidates = normalize_candidates(level, &raw);
                // Someone may have typed while the fetch was pending.
                field.suggestions = if field.text.is_empty() || field.committed.is_some() {
                    Suggestions::hidden()
                } else {
                    index.filter(&field.candidates, &field.text)
                };
                debug!("{level:?}: {} candidates", field.candidates.len());
                ApplyOutcome::Applied {
                    count: field.candidates.len(),
                }
            }
            Err(e) => {
                warn!("failed to load {level:?} candidates for {:?}: {e}", ticket.query);
                field.candidates.clear();
                field.suggestions = Suggestions::hidden();
                ApplyOutcome::Failed
            }
        }
    }

    /// Focus left the control: hide every panel.
    pub fn dismiss_suggestions(&mut self) {
        for field in &mut self.fields {
            field.suggestions = Suggestions::hidden();
        }
    }

    /// Back to `Empty`. The module listing is kept; it does not depend on
    /// anything upstream.
    pub fn reset(&mut self) {
        let module = self.field_mut(Level::Module);
        module.text.clear();
        module.committed = None;
        module.suggestions = Suggestions::hidden();

        self.field_mut(Level::Model).reset(false);
        self.field_mut(Level::Variant).reset(false);
        self.phase = CascadePhase::Empty;
        info!("cascade reset");

        debug_assert!(self.holds_enablement_invariant());
    }

    /// Level L is enabled only when level L-1 holds a non-empty committed value.
    fn holds_enablement_invariant(&self) -> bool {
        Level::ALL.iter().all(|&level| match level.previous() {
            None => true,
            Some(prev) => {
                !self.field(level).enabled
                    || self.field(prev).committed().is_some_and(|v| !v.is_empty())
            }
        })
    }
}
