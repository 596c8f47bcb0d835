use tracing::debug;

use super::chip::{Chip, VariantPath};
use crate::types::ChipId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added(ChipId),
    /// An equal triple is already held; nothing changed.
    AlreadyPresent(ChipId),
}

impl AddOutcome {
    pub fn id(self) -> ChipId {
        match self {
            AddOutcome::Added(id) | AddOutcome::AlreadyPresent(id) => id,
        }
    }

    pub fn was_added(self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }
}

/// Ordered, deduplicated set of chips in insertion order.
///
/// Ids come from a counter owned by the collection and are never reused, so
/// a removal addressed by id can never hit a different chip.
#[derive(Debug, Default, Clone)]
pub struct ChipCollection {
    chips: Vec<Chip>,
    next_id: u64,
}

impl ChipCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: VariantPath) -> AddOutcome {
        if let Some(existing) = self.chips.iter().find(|c| c.path == path) {
            debug!("chip already present: {}", existing.path);
            return AddOutcome::AlreadyPresent(existing.id);
        }

        let id = ChipId::new(self.next_id);
        self.next_id += 1;
        debug!("chip added: {} ({id})", path);
        self.chips.push(Chip { id, path });
        AddOutcome::Added(id)
    }

    /// Positional removal; out of range is a silent no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<Chip> {
        if index >= self.chips.len() {
            debug!("remove_at({index}) ignored, {} chips held", self.chips.len());
            return None;
        }
        Some(self.chips.remove(index))
    }

    /// Identity removal; a chip already gone is a silent no-op.
    pub fn remove(&mut self, id: ChipId) -> Option<Chip> {
        let index = self.position(id)?;
        Some(self.chips.remove(index))
    }

    pub fn clear(&mut self) {
        self.chips.clear();
    }

    pub fn position(&self, id: ChipId) -> Option<usize> {
        self.chips.iter().position(|c| c.id == id)
    }

    pub fn get(&self, id: ChipId) -> Option<&Chip> {
        self.chips.iter().find(|c| c.id == id)
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    pub fn labels(&self) -> Vec<String> {
        self.chips.iter().map(Chip::label).collect()
    }

    /// Variant names in chip order; what the scoring request sends.
    pub fn variants(&self) -> Vec<String> {
        self.chips
            .iter()
            .map(|c| c.path.variant().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }
}
