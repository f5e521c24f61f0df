//! The result of one generation run.

use crate::generator::seed::SeedResolution;
use serde::{Deserialize, Serialize};

/// Where the successor appended at one step came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOrigin {
    /// The full trailing context was a learned key.
    Exact,

    /// The full context was unseen; a suffix of length `order` matched.
    /// `order` is `0` when the any-symbol floor supplied the successor.
    BackedOff { order: usize },
}

/// A generated sequence together with how it was produced.
///
/// The sequence starts with the resolved starting context and has one
/// entry in [`origins`](Self::origins) for every symbol appended after it.
/// A run that ran out of successors is still a valid result: check
/// [`stopped_early`](Self::stopped_early) or compare [`len`](Self::len)
/// against [`target_length`](Self::target_length).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation<S> {
    pub(crate) sequence: Vec<S>,
    pub(crate) target_length: usize,
    pub(crate) seed_resolution: SeedResolution,
    pub(crate) origins: Vec<StepOrigin>,
    pub(crate) stopped_early: bool,
}

impl<S> Generation<S> {
    /// The generated symbols, starting context included.
    pub fn sequence(&self) -> &[S] {
        &self.sequence
    }

    /// Consume the report, keeping only the symbols.
    pub fn into_sequence(self) -> Vec<S> {
        self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Length that was requested.
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// How the starting context was chosen.
    pub fn seed_resolution(&self) -> SeedResolution {
        self.seed_resolution
    }

    /// Origin of every appended symbol, in order.
    pub fn origins(&self) -> &[StepOrigin] {
        &self.origins
    }

    /// Number of symbols that needed a shorter context than the model order.
    pub fn backoff_count(&self) -> usize {
        self.origins
            .iter()
            .filter(|origin| matches!(origin, StepOrigin::BackedOff { .. }))
            .count()
    }

    /// Whether generation ended before `target_length` because no context,
    /// however short, had a successor.
    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }

    /// Whether the sequence reached the requested length.
    pub fn is_complete(&self) -> bool {
        self.sequence.len() == self.target_length
    }
}
