use crate::types::ChipId;

/// Horizontal drag distance, in pixels, a release must exceed to remove a chip.
pub const SWIPE_REMOVE_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeOutcome {
    Remove(ChipId),
    /// Released short of the threshold; the chip returns to offset 0.
    SnapBack,
}

/// Tracks one touch drag on one chip.
///
/// Bound to the chip's id rather than its position, so a removal that lands
/// after the collection has shifted still targets the right chip.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    chip: ChipId,
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(chip: ChipId) -> Self {
        Self { chip, start_x: None }
    }

    pub fn chip(&self) -> ChipId {
        self.chip
    }

    pub fn start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Current translation to render, or `None` when no drag is active.
    pub fn moved(&self, x: f64) -> Option<f64> {
        self.start_x.map(|start| x - start)
    }

    /// Ends the drag. A release without a matching start is a snap back.
    pub fn released(&mut self, x: f64) -> SwipeOutcome {
        let Some(start) = self.start_x.take() else {
            return SwipeOutcome::SnapBack;
        };
        if x - start > SWIPE_REMOVE_THRESHOLD {
            SwipeOutcome::Remove(self.chip)
        } else {
            SwipeOutcome::SnapBack
        }
    }

    pub fn is_active(&self) -> bool {
        self.start_x.is_some()
    }
}
