use std::collections::HashSet;

use mte_core::chips::{
    AddOutcome, ChipCollection, ChipError, SwipeOutcome, SwipeTracker, VariantPath,
};
use mte_core::types::Level;

fn path(module: &str, model: &str, variant: &str) -> VariantPath {
    VariantPath::new(module, model, variant).unwrap()
}

fn assert_unique(chips: &ChipCollection) {
    let mut seen = HashSet::new();
    for chip in chips.chips() {
        assert!(seen.insert(chip.path.clone()), "duplicate chip {}", chip.label());
    }
}

#[test]
fn label_joins_triple_with_arrows() {
    let mut chips = ChipCollection::new();
    chips.add(path("Engine A", "E1", "V1"));

    assert_eq!(chips.labels(), vec!["Engine A > E1 > V1"]);
}

#[test]
fn empty_parts_are_rejected() {
    assert_eq!(
        VariantPath::new("Engine A", "", "V1"),
        Err(ChipError::EmptyField(Level::Model))
    );
    assert_eq!(
        VariantPath::new("", "E1", "V1"),
        Err(ChipError::EmptyField(Level::Module))
    );
}

#[test]
fn duplicate_triple_is_a_noop() {
    let mut chips = ChipCollection::new();
    let first = chips.add(path("Engine A", "E1", "V1"));
    let second = chips.add(path("Engine A", "E1", "V1"));

    assert!(first.was_added());
    assert_eq!(second, AddOutcome::AlreadyPresent(first.id()));
    assert_eq!(chips.len(), 1);
}

#[test]
fn same_variant_under_different_model_is_distinct() {
    let mut chips = ChipCollection::new();
    chips.add(path("Engine A", "E1", "V1"));
    chips.add(path("Engine A", "E2", "V1"));

    assert_eq!(chips.len(), 2);
    // Variants are sent as-is, duplicates included
    assert_eq!(chips.variants(), vec!["V1", "V1"]);
}

#[test]
fn remove_at_out_of_bounds_leaves_collection_unchanged() {
    let mut chips = ChipCollection::new();
    chips.add(path("Engine A", "E1", "V1"));
    chips.add(path("Engine A", "E1", "V2"));
    let before = chips.labels();

    assert!(chips.remove_at(2).is_none());
    assert!(chips.remove_at(usize::MAX).is_none());
    assert_eq!(chips.labels(), before);
}

#[test]
fn remove_at_keeps_insertion_order_of_the_rest() {
    let mut chips = ChipCollection::new();
    chips.add(path("M", "A", "1"));
    chips.add(path("M", "A", "2"));
    chips.add(path("M", "A", "3"));

    let removed = chips.remove_at(1).unwrap();
    assert_eq!(removed.path.variant(), "2");
    assert_eq!(chips.variants(), vec!["1", "3"]);
}

#[test]
fn identity_removal_survives_a_shift() {
    let mut chips = ChipCollection::new();
    let first = chips.add(path("M", "A", "1")).id();
    let second = chips.add(path("M", "A", "2")).id();

    // Click removes the first chip while a swipe on the second is pending
    chips.remove_at(0);
    let swiped = chips.remove(second).unwrap();
    assert_eq!(swiped.path.variant(), "2");
    assert!(chips.is_empty());

    // A late swipe on an already-removed chip does nothing
    assert!(chips.remove(first).is_none());
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut chips = ChipCollection::new();
    let a = chips.add(path("M", "A", "1")).id();
    chips.remove(a);
    let b = chips.add(path("M", "A", "1")).id();

    assert_ne!(a, b);
}

#[test]
fn random_add_remove_sequence_never_duplicates() {
    let variants = ["V1", "V2", "V3"];
    let models = ["E1", "E2"];
    let mut chips = ChipCollection::new();

    // Deterministic pseudo-random walk
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    for _ in 0..500 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        match seed % 4 {
            0 => {
                chips.remove_at((seed >> 8) as usize % 5);
            }
            1 => {
                if let Some(first) = chips.chips().first().map(|c| c.id) {
                    chips.remove(first);
                }
            }
            _ => {
                let model = models[(seed >> 16) as usize % models.len()];
                let variant = variants[(seed >> 24) as usize % variants.len()];
                chips.add(path("Engine A", model, variant));
            }
        }
        assert_unique(&chips);
        assert!(chips.len() <= models.len() * variants.len());
    }
}

#[test]
fn clear_empties_collection() {
    let mut chips = ChipCollection::new();
    chips.add(path("M", "A", "1"));
    chips.add(path("M", "A", "2"));
    chips.clear();

    assert!(chips.is_empty());
}

#[test]
fn swipe_past_threshold_removes_bound_chip() {
    let mut chips = ChipCollection::new();
    let id = chips.add(path("M", "A", "1")).id();

    let mut tracker = SwipeTracker::new(id);
    tracker.start(10.0);
    assert_eq!(tracker.moved(60.0), Some(50.0));

    let outcome = tracker.released(111.0);
    assert_eq!(outcome, SwipeOutcome::Remove(id));
    assert!(!tracker.is_active());
}

#[test]
fn swipe_at_or_below_threshold_snaps_back() {
    let mut chips = ChipCollection::new();
    let id = chips.add(path("M", "A", "1")).id();

    let mut tracker = SwipeTracker::new(id);
    tracker.start(0.0);
    assert_eq!(tracker.released(100.0), SwipeOutcome::SnapBack);

    tracker.start(200.0);
    // Leftward drags never remove
    assert_eq!(tracker.released(0.0), SwipeOutcome::SnapBack);
}

#[test]
fn release_without_start_snaps_back() {
    let mut chips = ChipCollection::new();
    let id = chips.add(path("M", "A", "1")).id();

    let mut tracker = SwipeTracker::new(id);
    assert_eq!(tracker.moved(50.0), None);
    assert_eq!(tracker.released(500.0), SwipeOutcome::SnapBack);
}
