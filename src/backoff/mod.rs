//! Order backoff for contexts the model never observed.
//!
//! When the trailing context of a sequence is not a key, the generator
//! retries with progressively shorter contexts. A shorter level is what the
//! model would look like had it been trained at that order: every key loses
//! its oldest symbol, and keys that collapse together pool their
//! observations with multiplicity preserved.
//!
//! Levels do not depend on the query, so all of them (`order - 1` down to
//! `1`, plus the empty-context floor) are derived once when the model is
//! built. A lookup is then a linear scan from the longest level down.
//!
//! # Example
//!
//! ```rust
//! use chordchain::backoff::{backoff, BackoffFloor};
//! use chordchain::builder::build;
//!
//! let model = build(&["A", "B", "C", "B", "C", "D"], 2).unwrap();
//!
//! // ("D", "C") was never seen, but "C" was seen as the tail of ("B", "C").
//! let found = backoff(&model, &["D", "C"], BackoffFloor::Stop).unwrap();
//! assert_eq!(found.order, 1);
//! assert_eq!(found.pool, &["B", "D"]);
//!
//! // Nothing ever followed "D".
//! assert!(backoff(&model, &["C", "D"], BackoffFloor::Stop).is_none());
//! ```

use crate::core::{Symbol, TransitionModel, TransitionTable};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What backoff does once the context has shrunk to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffFloor {
    /// The empty context matches nothing; generation stops early.
    #[default]
    Stop,

    /// The empty context matches every observation in the model, so any
    /// learned symbol may follow.
    AnySymbol,
}

/// A successor pool found by [`backoff`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffMatch<'a, S> {
    /// Length of the context that matched. Equal to the model order for an
    /// exact hit and `0` for the [`BackoffFloor::AnySymbol`] floor.
    pub order: usize,

    /// Observations for the matched context, duplicates included.
    pub pool: &'a [S],
}

impl<S> BackoffMatch<'_, S> {
    /// Number of symbols dropped from a context of length `from` to reach
    /// this match.
    pub fn steps_from(&self, from: usize) -> usize {
        from.saturating_sub(self.order)
    }
}

/// Lower-order tables derived from a model's own table.
#[derive(Clone, Debug)]
pub(crate) struct BackoffLevels<S: Symbol> {
    /// `lower[k - 1]` holds the order-`k` table for `k` in `1..order`.
    lower: Vec<TransitionTable<S>>,
    /// Every observation, collapsed onto the empty context.
    floor: Vec<S>,
}

impl<S: Symbol> BackoffLevels<S> {
    /// Derive every level below `order` from the order-`order` table.
    ///
    /// Each level is collapsed from the one directly above it, so pooled
    /// observation lists come out in the same order repeated one-step
    /// collapsing would produce.
    pub(crate) fn derive(table: &TransitionTable<S>, order: usize) -> Self {
        let mut descending = Vec::with_capacity(order.saturating_sub(1));
        let mut current = table.collapse();
        while descending.len() + 1 < order {
            let lower = current.collapse();
            descending.push(current);
            current = lower;
        }
        descending.reverse();

        let floor = current.get(&[]).map(<[S]>::to_vec).unwrap_or_default();

        Self {
            lower: descending,
            floor,
        }
    }

    /// Table for context length `k`, if `k` is strictly below the model order.
    pub(crate) fn level(&self, k: usize) -> Option<&TransitionTable<S>> {
        k.checked_sub(1).and_then(|i| self.lower.get(i))
    }

    /// Number of lower levels, `order - 1`.
    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.lower.len()
    }

    pub(crate) fn floor(&self) -> &[S] {
        &self.floor
    }
}

/// Find the observation pool for the longest matching suffix of `context`.
///
/// The full context is tried first (only the trailing `model.order()`
/// symbols are considered), then every shorter suffix down to length one.
/// The context never grows between attempts, so at most `order` lookups are
/// made. When nothing matches, `floor` decides between giving up (`None`)
/// and the pool of every observation.
///
/// Pure: the model is only read and no randomness is involved.
pub fn backoff<'a, S: Symbol>(
    model: &'a TransitionModel<S>,
    context: &[S],
    floor: BackoffFloor,
) -> Option<BackoffMatch<'a, S>> {
    let order = model.order();
    let start = context.len().min(order);
    let context = &context[context.len() - start..];

    for k in (1..=start).rev() {
        let suffix = &context[start - k..];
        let pool = if k == order {
            model.observations(suffix)
        } else {
            model.levels().level(k).and_then(|level| level.get(suffix))
        };
        if let Some(pool) = pool {
            if k < start {
                trace!(from = start, to = k, "backed off to shorter context");
            }
            return Some(BackoffMatch { order: k, pool });
        }
    }

    match floor {
        BackoffFloor::Stop => None,
        BackoffFloor::AnySymbol => {
            let pool = model.levels().floor();
            trace!(from = start, "backed off to empty context");
            (!pool.is_empty()).then_some(BackoffMatch { order: 0, pool })
        }
    }
}
