//! Selection store: ordered per-operator target lists with origin flags
//!
//! Each operator builds an ordered list of block positions through an
//! external editor; positions flagged as "origin" are the reference points
//! the editor highlights and protect mode centers on. The store is plain
//! in-memory bookkeeping, owned by whoever composes the editor and the
//! scheduler, so tests and multiple worlds stay isolated.

use crate::world::pos::BlockPos;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// One operator's selection state
#[derive(Debug, Default)]
struct SelectionRecord {
    /// Insertion-ordered positions; duplicates allowed, indexed for removal
    order: Vec<BlockPos>,
    /// Positions flagged as origins; membership only
    origins: HashSet<BlockPos>,
}

/// Per-operator ordered selection lists with origin membership
#[derive(Debug, Default)]
pub struct SelectionStore {
    records: HashMap<Uuid, SelectionRecord>,
}

impl SelectionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a position to the operator's selection
    ///
    /// The record is created lazily on first insertion. No uniqueness is
    /// enforced; the same position may be added multiple times.
    pub fn add(&mut self, operator: Uuid, pos: BlockPos, is_origin: bool) {
        let record = self.records.entry(operator).or_default();
        record.order.push(pos);
        if is_origin {
            record.origins.insert(pos);
        }
    }

    /// The operator's current selection, in insertion order
    ///
    /// Empty when the operator has no record.
    pub fn list(&self, operator: Uuid) -> &[BlockPos] {
        self.records
            .get(&operator)
            .map(|r| r.order.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the position is flagged as an origin for the operator
    pub fn is_origin(&self, operator: Uuid, pos: BlockPos) -> bool {
        self.records
            .get(&operator)
            .is_some_and(|r| r.origins.contains(&pos))
    }

    /// Remove the entry at `index`, shifting later entries down by one
    ///
    /// Returns the removed position, or `None` when the index is out of
    /// range (a no-op). The popped value is also dropped from the origin
    /// set. When the last entry goes, the operator's record goes with it.
    pub fn remove_at(&mut self, operator: Uuid, index: usize) -> Option<BlockPos> {
        let record = self.records.get_mut(&operator)?;
        if index >= record.order.len() {
            return None;
        }

        let removed = record.order.remove(index);
        record.origins.remove(&removed);

        if record.order.is_empty() {
            self.records.remove(&operator);
        }

        Some(removed)
    }

    /// Empty the operator's selection and origin set in place
    ///
    /// The (now-empty) record is kept; a missing record is a no-op.
    pub fn clear(&mut self, operator: Uuid) {
        if let Some(record) = self.records.get_mut(&operator) {
            record.order.clear();
            record.origins.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, z: i32) -> BlockPos {
        BlockPos::new(x, z)
    }

    #[test]
    fn test_add_and_list_preserves_order() {
        let mut store = SelectionStore::new();
        let op = Uuid::new_v4();

        store.add(op, pos(0, 0), true);
        store.add(op, pos(32, 0), false);
        store.add(op, pos(0, 32), false);

        assert_eq!(store.list(op), &[pos(0, 0), pos(32, 0), pos(0, 32)]);
        assert!(store.is_origin(op, pos(0, 0)));
        assert!(!store.is_origin(op, pos(32, 0)));
    }

    #[test]
    fn test_list_unknown_operator_is_empty() {
        let store = SelectionStore::new();
        assert!(store.list(Uuid::new_v4()).is_empty());
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut store = SelectionStore::new();
        let op = Uuid::new_v4();

        store.add(op, pos(1, 1), false);
        store.add(op, pos(1, 1), false);
        assert_eq!(store.list(op).len(), 2);
    }

    #[test]
    fn test_remove_at_middle_shifts_indices() {
        let mut store = SelectionStore::new();
        let op = Uuid::new_v4();

        store.add(op, pos(0, 0), false);
        store.add(op, pos(1, 0), false);
        store.add(op, pos(2, 0), false);

        assert_eq!(store.remove_at(op, 1), Some(pos(1, 0)));
        assert_eq!(store.list(op), &[pos(0, 0), pos(2, 0)]);
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut store = SelectionStore::new();
        let op = Uuid::new_v4();

        store.add(op, pos(0, 0), true);
        assert_eq!(store.remove_at(op, 5), None);
        assert_eq!(store.list(op).len(), 1);
        assert!(store.is_origin(op, pos(0, 0)));
    }

    #[test]
    fn test_remove_at_unknown_operator_is_noop() {
        let mut store = SelectionStore::new();
        assert_eq!(store.remove_at(Uuid::new_v4(), 0), None);
    }

    #[test]
    fn test_remove_last_entry_drops_record() {
        let mut store = SelectionStore::new();
        let op = Uuid::new_v4();

        store.add(op, pos(0, 0), true);
        store.remove_at(op, 0);

        assert!(store.list(op).is_empty());
        assert!(!store.is_origin(op, pos(0, 0)));
    }

    #[test]
    fn test_remove_drops_origin_membership() {
        let mut store = SelectionStore::new();
        let op = Uuid::new_v4();

        store.add(op, pos(0, 0), true);
        store.add(op, pos(1, 0), false);
        store.remove_at(op, 0);

        assert!(!store.is_origin(op, pos(0, 0)));
        assert_eq!(store.list(op), &[pos(1, 0)]);
    }

    #[test]
    fn test_remove_duplicated_origin_drops_flag_on_first_removal() {
        // Origin membership is a set operation on the value: removing one
        // occurrence of a duplicated position clears its origin flag.
        let mut store = SelectionStore::new();
        let op = Uuid::new_v4();

        store.add(op, pos(0, 0), true);
        store.add(op, pos(0, 0), false);
        store.remove_at(op, 0);

        assert_eq!(store.list(op).len(), 1);
        assert!(!store.is_origin(op, pos(0, 0)));
    }

    #[test]
    fn test_clear_keeps_record_and_empties_both() {
        let mut store = SelectionStore::new();
        let op = Uuid::new_v4();

        store.add(op, pos(0, 0), true);
        store.add(op, pos(1, 0), false);
        store.clear(op);

        assert!(store.list(op).is_empty());
        assert!(!store.is_origin(op, pos(0, 0)));

        // Record survives: adding again works as usual
        store.add(op, pos(2, 0), false);
        assert_eq!(store.list(op), &[pos(2, 0)]);
    }

    #[test]
    fn test_clear_unknown_operator_is_noop() {
        let mut store = SelectionStore::new();
        store.clear(Uuid::new_v4());
    }

    #[test]
    fn test_operators_are_independent() {
        let mut store = SelectionStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.add(a, pos(0, 0), true);
        store.add(b, pos(5, 5), false);
        store.clear(a);

        assert!(store.list(a).is_empty());
        assert_eq!(store.list(b), &[pos(5, 5)]);
    }

    #[test]
    fn test_length_tracks_adds_and_removes() {
        let mut store = SelectionStore::new();
        let op = Uuid::new_v4();

        for i in 0..6 {
            store.add(op, pos(i, 0), false);
        }
        store.remove_at(op, 0);
        store.remove_at(op, 0);
        store.remove_at(op, 99); // no-op

        assert_eq!(store.list(op).len(), 4);
        assert_eq!(store.list(op)[0], pos(2, 0));
    }
}
