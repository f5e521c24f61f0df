//! Insertion-ordered context table.

use super::context::Context;
use super::symbol::Symbol;
use std::collections::HashMap;

/// Mapping from context to its observation list, iterated in first-appearance
/// order.
///
/// Keeping a stable key order is what makes uniform choice over keys
/// reproducible under a seeded random source; a bare `HashMap` would reorder
/// keys from one process to the next.
#[derive(Clone, Debug)]
pub(crate) struct TransitionTable<S: Symbol> {
    entries: Vec<(Context<S>, Vec<S>)>,
    index: HashMap<Context<S>, usize>,
}

impl<S: Symbol> Default for TransitionTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> TransitionTable<S> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append one observation under `context`, creating the entry if absent.
    pub(crate) fn record(&mut self, context: &[S], target: S) {
        let slot = self.slot(context);
        self.entries[slot].1.push(target);
    }

    /// Append a run of observations under `context`, creating the entry if
    /// absent. Multiplicity and order are preserved.
    pub(crate) fn extend(&mut self, context: &[S], observations: &[S]) {
        let slot = self.slot(context);
        self.entries[slot].1.extend_from_slice(observations);
    }

    fn slot(&mut self, context: &[S]) -> usize {
        if let Some(&slot) = self.index.get(context) {
            return slot;
        }
        let slot = self.entries.len();
        let key = Context::from_slice(context);
        self.index.insert(key.clone(), slot);
        self.entries.push((key, Vec::new()));
        slot
    }

    pub(crate) fn get(&self, context: &[S]) -> Option<&[S]> {
        self.index
            .get(context)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    pub(crate) fn contains(&self, context: &[S]) -> bool {
        self.index.contains_key(context)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Context at position `slot` in first-appearance order.
    pub(crate) fn key_at(&self, slot: usize) -> Option<&Context<S>> {
        self.entries.get(slot).map(|(key, _)| key)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Context<S>, &[S])> {
        self.entries
            .iter()
            .map(|(key, observations)| (key, observations.as_slice()))
    }

    /// Derive the table one order lower by dropping the oldest symbol of
    /// every key.
    ///
    /// Keys that collapse onto the same shorter key have their observation
    /// lists concatenated in this table's key order.
    pub(crate) fn collapse(&self) -> Self {
        let mut lower = Self::new();
        for (key, observations) in &self.entries {
            lower.extend(key.drop_first().symbols(), observations);
        }
        lower
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_preserves_first_appearance_order() {
        let mut table = TransitionTable::new();
        table.record(&["B", "C"], "D");
        table.record(&["A", "B"], "C");
        table.record(&["B", "C"], "B");

        let keys: Vec<_> = table.iter().map(|(k, _)| k.symbols().to_vec()).collect();
        assert_eq!(keys, vec![vec!["B", "C"], vec!["A", "B"]]);
        assert_eq!(table.get(&["B", "C"]), Some(&["D", "B"][..]));
        assert_eq!(table.key_at(1).map(|k| k.symbols()), Some(&["A", "B"][..]));
    }

    #[test]
    fn collapse_concatenates_in_key_order() {
        let mut table = TransitionTable::new();
        table.record(&["a", "x", "y"], "1");
        table.record(&["b", "z", "y"], "2");
        table.record(&["c", "x", "y"], "3");

        let order2 = table.collapse();
        assert_eq!(order2.len(), 2);
        assert_eq!(order2.get(&["x", "y"]), Some(&["1", "3"][..]));
        assert_eq!(order2.get(&["z", "y"]), Some(&["2"][..]));

        let order1 = order2.collapse();
        assert_eq!(order1.get(&["y"]), Some(&["1", "3", "2"][..]));

        let order0 = order1.collapse();
        assert_eq!(order0.get(&[]), Some(&["1", "3", "2"][..]));
    }

    #[test]
    fn collapse_keeps_duplicates() {
        let mut table = TransitionTable::new();
        table.record(&[1, 2], 9);
        table.record(&[1, 2], 9);
        table.record(&[3, 2], 9);

        let lower = table.collapse();
        assert_eq!(lower.get(&[2]), Some(&[9, 9, 9][..]));
    }

    #[test]
    fn empty_table_collapses_to_empty() {
        let table: TransitionTable<u8> = TransitionTable::new();
        assert!(table.collapse().is_empty());
        assert!(!table.contains(&[]));
    }
}
