//! The immutable transition model.

use super::context::Context;
use super::symbol::Symbol;
use super::table::TransitionTable;
use crate::backoff::{BackoffFloor, BackoffLevels, BackoffMatch};
use std::collections::{HashMap, HashSet};

/// Learned mapping from context to the symbols observed to follow it.
///
/// Observation lists keep duplicates: a successor seen `k` times after a
/// context appears `k` times in its list, and that repetition is the only
/// probability encoding the model has. Every key is exactly `order()`
/// symbols long and every list is non-empty.
///
/// Models are built by [`crate::builder::ModelBuilder`] (or
/// [`crate::builder::build`]) and never change afterwards. The lower-order
/// levels used for backoff are derived once at construction, so a model can
/// be shared across threads and queried concurrently.
///
/// # Example
///
/// ```rust
/// use chordchain::builder::build;
///
/// let corpus = ["A", "B", "C", "B", "C", "D", "A", "B", "C"];
/// let model = build(&corpus, 2).unwrap();
///
/// assert_eq!(model.order(), 2);
/// assert_eq!(model.observations(&["A", "B"]), Some(&["C", "C"][..]));
/// assert_eq!(model.observations(&["B", "C"]), Some(&["B", "D"][..]));
/// ```
#[derive(Clone, Debug)]
pub struct TransitionModel<S: Symbol> {
    order: usize,
    table: TransitionTable<S>,
    levels: BackoffLevels<S>,
}

impl<S: Symbol> TransitionModel<S> {
    /// Wrap a fully recorded table and derive its backoff levels.
    ///
    /// Callers guarantee `order >= 1` and that every key has `order` symbols.
    pub(crate) fn from_table(order: usize, table: TransitionTable<S>) -> Self {
        let levels = BackoffLevels::derive(&table, order);
        Self {
            order,
            table,
            levels,
        }
    }

    /// Context length of every key.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of distinct contexts.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if no transition was recorded.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Contexts in first-appearance order.
    pub fn contexts(&self) -> impl Iterator<Item = &Context<S>> {
        self.table.iter().map(|(key, _)| key)
    }

    /// `(context, observations)` pairs in first-appearance order.
    pub fn entries(&self) -> impl Iterator<Item = (&Context<S>, &[S])> {
        self.table.iter()
    }

    /// Observation list recorded for an exact context.
    pub fn observations(&self, context: &[S]) -> Option<&[S]> {
        self.table.get(context)
    }

    /// Check if `context` is an exact key.
    pub fn contains(&self, context: &[S]) -> bool {
        self.table.contains(context)
    }

    /// Total number of recorded transitions, duplicates included.
    pub fn observation_count(&self) -> usize {
        self.table
            .iter()
            .map(|(_, observations)| observations.len())
            .sum()
    }

    /// Distinct symbols seen anywhere in the model, in first-appearance order.
    pub fn alphabet(&self) -> Vec<&S> {
        let mut seen = HashSet::new();
        let mut alphabet = Vec::new();
        for (key, observations) in self.table.iter() {
            for symbol in key.symbols().iter().chain(observations) {
                if seen.insert(symbol) {
                    alphabet.push(symbol);
                }
            }
        }
        alphabet
    }

    /// Share of `context`'s observations equal to `symbol`.
    ///
    /// Returns `None` when the context is not an exact key, and `Some(0.0)`
    /// for a known context that was never followed by `symbol`.
    pub fn probability(&self, context: &[S], symbol: &S) -> Option<f64> {
        let observations = self.table.get(context)?;
        let hits = observations.iter().filter(|s| *s == symbol).count();
        Some(hits as f64 / observations.len() as f64)
    }

    /// Distinct successors of `context` with their frequency share, in
    /// first-appearance order.
    pub fn distribution(&self, context: &[S]) -> Option<Vec<(&S, f64)>> {
        let observations = self.table.get(context)?;
        let total = observations.len() as f64;
        let mut order: Vec<&S> = Vec::new();
        let mut counts: HashMap<&S, usize> = HashMap::new();
        for symbol in observations {
            let count = counts.entry(symbol).or_insert(0);
            if *count == 0 {
                order.push(symbol);
            }
            *count += 1;
        }
        Some(
            order
                .into_iter()
                .map(|symbol| (symbol, counts[symbol] as f64 / total))
                .collect(),
        )
    }

    /// Find a successor pool for `context`, backing off to shorter contexts
    /// when the exact one was never observed.
    ///
    /// See [`crate::backoff::backoff`].
    pub fn backoff(&self, context: &[S], floor: BackoffFloor) -> Option<BackoffMatch<'_, S>> {
        crate::backoff::backoff(self, context, floor)
    }

    /// Context at position `slot` in first-appearance order.
    pub(crate) fn context_at(&self, slot: usize) -> Option<&Context<S>> {
        self.table.key_at(slot)
    }

    pub(crate) fn levels(&self) -> &BackoffLevels<S> {
        &self.levels
    }
}
