use super::ScoreResult;

pub const SCORE_ZERO_TEXT: &str = "Overall MTE: 0";
pub const SCORE_ERROR_TEXT: &str = "Error calculating MTE";

/// Identifies one calculation's claim on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTicket(u64);

/// Displayed score text and the in-progress indicator.
///
/// Only the most recent `begin` may write its result; `reset` orphans any
/// calculation still in flight.
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    text: String,
    loading: bool,
    generation: u64,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self {
            text: SCORE_ZERO_TEXT.to_string(),
            loading: false,
            generation: 0,
        }
    }
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin(&mut self) -> ScoreTicket {
        self.generation += 1;
        self.loading = true;
        self.text.clear();
        ScoreTicket(self.generation)
    }

    /// Returns false if the ticket was superseded and nothing changed.
    pub fn finish(&mut self, ticket: ScoreTicket, result: &ScoreResult) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.loading = false;
        self.text = match result {
            ScoreResult::Zero => SCORE_ZERO_TEXT.to_string(),
            ScoreResult::Value(value) => format!("Overall MTE: {value}"),
            ScoreResult::Failed(_) => SCORE_ERROR_TEXT.to_string(),
        };
        true
    }

    /// Show the zero score without a calculation.
    pub fn show_zero(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.text = SCORE_ZERO_TEXT.to_string();
    }

    pub fn reset(&mut self) {
        self.show_zero();
    }
}
