//! Fluent builder for training a model over a whole corpus.

use crate::builder::error::BuildError;
use crate::builder::record_transitions;
use crate::config::TrainingConfig;
use crate::core::{Symbol, TransitionModel, TransitionTable};
use tracing::debug;

/// Context order used when none is set.
pub const DEFAULT_ORDER: usize = 2;

/// Builder that trains one model from any number of sequences.
///
/// Each sequence is windowed on its own, so no transition is ever recorded
/// across the end of one sequence and the start of the next. Sequences are
/// trained in the order they were added, which fixes the key order of the
/// resulting model.
///
/// # Example
///
/// ```rust
/// use chordchain::builder::ModelBuilder;
///
/// let model = ModelBuilder::new()
///     .order(1)
///     .sequence(["C", "F", "G", "C"])
///     .sequence(["A", "D", "G", "C"])
///     .build()
///     .unwrap();
///
/// assert_eq!(model.observations(&["G"]), Some(&["C", "C"][..]));
/// // The boundary C -> A between the two sequences is not learned.
/// assert_eq!(model.observations(&["C"]), Some(&["F"][..]));
/// ```
pub struct ModelBuilder<S: Symbol> {
    order: Option<usize>,
    sequences: Vec<Vec<S>>,
}

impl<S: Symbol> ModelBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            order: None,
            sequences: Vec::new(),
        }
    }

    /// Create a builder with settings taken from configuration.
    pub fn from_config(config: &TrainingConfig) -> Self {
        Self::new().order(config.order)
    }

    /// Set the context order (defaults to [`DEFAULT_ORDER`]).
    pub fn order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    /// Add one training sequence.
    pub fn sequence<I>(mut self, sequence: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.sequences.push(sequence.into_iter().collect());
        self
    }

    /// Add several training sequences at once.
    pub fn sequences<I, T>(mut self, sequences: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = S>,
    {
        self.sequences
            .extend(sequences.into_iter().map(|s| s.into_iter().collect()));
        self
    }

    /// Train the model.
    ///
    /// Returns an error if the order is zero. Sequences no longer than the
    /// order contribute nothing; if every sequence is that short the model
    /// is empty, which is valid but cannot be generated from.
    pub fn build(self) -> Result<TransitionModel<S>, BuildError> {
        let order = self.order.unwrap_or(DEFAULT_ORDER);
        if order < 1 {
            return Err(BuildError::InvalidOrder { order });
        }

        let mut table = TransitionTable::new();
        for sequence in &self.sequences {
            record_transitions(&mut table, sequence, order);
        }

        let model = TransitionModel::from_table(order, table);
        debug!(
            order,
            sequences = self.sequences.len(),
            contexts = model.len(),
            observations = model.observation_count(),
            "built transition model"
        );
        Ok(model)
    }
}

impl<S: Symbol> Default for ModelBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
