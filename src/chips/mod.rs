pub mod chip;
pub mod collection;
pub mod gesture;

pub use crate::types::identifiers::ChipId;
pub use chip::{Chip, ChipError, VariantPath};
pub use collection::{AddOutcome, ChipCollection};
pub use gesture::{SwipeOutcome, SwipeTracker, SWIPE_REMOVE_THRESHOLD};
