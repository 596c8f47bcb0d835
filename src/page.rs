//! Event entry points for the surrounding UI layer.
//!
//! `SelectionPage` wires the cascade, the chip collection and the score
//! display to one [`MteService`]. Handlers that touch the network await the
//! fetch inline; hosts that need to interleave events while a fetch is
//! pending can drive [`CascadeController`] tickets themselves through
//! [`SelectionPage::cascade_mut`].

use tracing::debug;

use crate::cascade::{ApplyOutcome, CascadeController, CascadeError, FetchTicket};
use crate::chips::{AddOutcome, Chip, ChipCollection, ChipId, SwipeOutcome};
use crate::score::{ScoreBoard, ScoreClient, ScoreResult};
use crate::service::MteService;
use crate::suggest::Suggestions;
use crate::types::Level;

pub struct SelectionPage<S> {
    scorer: ScoreClient<S>,
    cascade: CascadeController,
    chips: ChipCollection,
    board: ScoreBoard,
}

impl<S> SelectionPage<S>
where
    S: MteService,
{
    pub fn new(service: S) -> Self {
        Self {
            scorer: ScoreClient::new(service),
            cascade: CascadeController::default(),
            chips: ChipCollection::new(),
            board: ScoreBoard::new(),
        }
    }

    pub fn service(&self) -> &S {
        self.scorer.service()
    }

    pub fn cascade(&self) -> &CascadeController {
        &self.cascade
    }

    pub fn cascade_mut(&mut self) -> &mut CascadeController {
        &mut self.cascade
    }

    pub fn chips(&self) -> &ChipCollection {
        &self.chips
    }

    pub fn suggestions(&self, level: Level) -> &Suggestions {
        self.cascade.field(level).suggestions()
    }

    pub fn score_text(&self) -> &str {
        self.board.text()
    }

    pub fn is_loading(&self) -> bool {
        self.board.is_loading()
    }

    /// Load the module listing.
    pub async fn start(&mut self) -> ApplyOutcome {
        let ticket = self.cascade.load_modules();
        self.resolve(ticket).await
    }

    async fn resolve(&mut self, ticket: FetchTicket) -> ApplyOutcome {
        let result = self.scorer.service().candidates(&ticket.query).await;
        self.cascade.apply_candidates(&ticket, result)
    }

    pub fn on_module_query_changed(&mut self, text: &str) -> &Suggestions {
        self.cascade.query_changed(Level::Module, text)
    }

    pub async fn on_module_selected(&mut self, text: &str) -> Result<ApplyOutcome, CascadeError> {
        let ticket = self.cascade.select_module(text)?;
        Ok(self.resolve(ticket).await)
    }

    pub fn on_model_query_changed(&mut self, text: &str) -> &Suggestions {
        self.cascade.query_changed(Level::Model, text)
    }

    pub async fn on_model_selected(&mut self, text: &str) -> Result<ApplyOutcome, CascadeError> {
        let ticket = self.cascade.select_model(text)?;
        Ok(self.resolve(ticket).await)
    }

    pub fn on_variant_query_changed(&mut self, text: &str) -> &Suggestions {
        self.cascade.query_changed(Level::Variant, text)
    }

    pub fn on_variant_selected(&mut self, text: &str) -> Result<AddOutcome, CascadeError> {
        let path = self.cascade.select_variant(text)?;
        Ok(self.chips.add(path))
    }

    /// The click path: remove whatever chip sits at `index` right now.
    pub fn on_chip_remove_requested(&mut self, index: usize) -> Option<Chip> {
        let removed = self.chips.remove_at(index);
        self.after_removal(removed)
    }

    /// Identity removal, shared by click handlers bound to a chip id.
    pub fn on_chip_remove_by_id(&mut self, id: ChipId) -> Option<Chip> {
        let removed = self.chips.remove(id);
        self.after_removal(removed)
    }

    /// The swipe path, once the gesture has been released.
    pub fn on_chip_swiped(&mut self, outcome: SwipeOutcome) -> Option<Chip> {
        match outcome {
            SwipeOutcome::Remove(id) => self.on_chip_remove_by_id(id),
            SwipeOutcome::SnapBack => None,
        }
    }

    fn after_removal(&mut self, removed: Option<Chip>) -> Option<Chip> {
        if removed.is_some() && self.chips.is_empty() {
            self.board.show_zero();
        }
        removed
    }

    pub async fn on_calculate_requested(&mut self) -> ScoreResult {
        if self.chips.is_empty() {
            self.board.show_zero();
            return ScoreResult::Zero;
        }

        let ticket = self.board.begin();
        let result = self.scorer.compute(self.chips.chips()).await;
        if !self.board.finish(ticket, &result) {
            debug!("score display was reset while calculating");
        }
        result
    }

    pub fn on_clear_all_requested(&mut self) {
        self.cascade.reset();
        self.chips.clear();
        self.board.reset();
    }

    pub fn on_click_outside(&mut self) {
        self.cascade.dismiss_suggestions();
    }
}
