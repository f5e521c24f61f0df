//! Training: turning symbol sequences into a transition model.
//!
//! The model is built by sliding a window of `order` symbols over each
//! training sequence and recording the symbol that follows every window.
//! Repeated successors are appended again rather than counted, so the
//! observation list itself carries the learned frequencies.

pub mod error;
pub mod model;

pub use error::BuildError;
pub use model::{ModelBuilder, DEFAULT_ORDER};

use crate::core::{Symbol, TransitionModel, TransitionTable};

/// Build a model from a single training sequence at context order `order`.
///
/// For every index `i` from `order` to the end, the `order` symbols before
/// `i` form the context and the symbol at `i` is appended to that context's
/// observations. A sequence no longer than `order` yields an empty model.
///
/// # Example
///
/// ```
/// use chordchain::builder::{build, BuildError};
///
/// let model = build(&["A", "B", "C", "B", "C", "D", "A", "B", "C"], 2).unwrap();
/// assert_eq!(model.observations(&["A", "B"]), Some(&["C", "C"][..]));
/// assert_eq!(model.observations(&["B", "C"]), Some(&["B", "D"][..]));
///
/// assert!(build(&["A", "B"], 3).unwrap().is_empty());
/// assert_eq!(build(&["A", "B"], 0).unwrap_err(), BuildError::InvalidOrder { order: 0 });
/// ```
pub fn build<S: Symbol>(training: &[S], order: usize) -> Result<TransitionModel<S>, BuildError> {
    if order < 1 {
        return Err(BuildError::InvalidOrder { order });
    }

    let mut table = TransitionTable::new();
    record_transitions(&mut table, training, order);
    Ok(TransitionModel::from_table(order, table))
}

/// Record every `(context, successor)` window of `sequence` into `table`.
pub(crate) fn record_transitions<S: Symbol>(
    table: &mut TransitionTable<S>,
    sequence: &[S],
    order: usize,
) {
    for window in sequence.windows(order + 1) {
        let (context, target) = window.split_at(order);
        table.record(context, target[0].clone());
    }
}
