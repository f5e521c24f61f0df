//! Saving and restoring trained models.
//!
//! A [`ModelSnapshot`] is a plain serializable picture of a model: its order
//! and every `(context, observations)` entry in first-appearance order.
//! Backoff levels are not stored; they are derived again on load, so a
//! restored model behaves exactly like the one that was saved, including
//! under a seeded random source.
//!
//! Two encodings are provided: JSON for readability and `bincode` for
//! compactness.

use crate::core::{Context, Symbol, TransitionModel, TransitionTable};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// One learned context and its observations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry<S> {
    pub context: Context<S>,
    pub observations: Vec<S>,
}

/// Serializable picture of a transition model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot<S> {
    /// Snapshot format version
    pub version: u32,

    /// When the snapshot was taken
    pub created_at: DateTime<Utc>,

    /// Context order of the model
    pub order: usize,

    /// Entries in first-appearance order
    pub entries: Vec<SnapshotEntry<S>>,
}

impl<S: Symbol> ModelSnapshot<S> {
    /// Capture a model.
    pub fn capture(model: &TransitionModel<S>) -> Self {
        let entries = model
            .entries()
            .map(|(context, observations)| SnapshotEntry {
                context: context.clone(),
                observations: observations.to_vec(),
            })
            .collect();

        Self {
            version: SNAPSHOT_VERSION,
            created_at: Utc::now(),
            order: model.order(),
            entries,
        }
    }

    /// Rebuild the model, validating the snapshot first.
    ///
    /// Rejects unknown versions, a zero order, keys of the wrong length,
    /// empty observation lists and repeated keys.
    pub fn restore(&self) -> Result<TransitionModel<S>, SnapshotError> {
        self.validate()?;

        let mut table = TransitionTable::new();
        for entry in &self.entries {
            table.extend(entry.context.symbols(), &entry.observations);
        }
        let model = TransitionModel::from_table(self.order, table);
        debug!(
            order = self.order,
            contexts = model.len(),
            created_at = %self.created_at,
            "restored transition model"
        );
        Ok(model)
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        if self.order < 1 {
            return Err(SnapshotError::ValidationFailed(format!(
                "order must be at least 1, got {}",
                self.order
            )));
        }

        let mut seen = HashSet::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.context.len() != self.order {
                return Err(SnapshotError::ValidationFailed(format!(
                    "entry {} has context length {}, expected {}",
                    i,
                    entry.context.len(),
                    self.order
                )));
            }
            if entry.observations.is_empty() {
                return Err(SnapshotError::ValidationFailed(format!(
                    "entry {} has no observations",
                    i
                )));
            }
            if !seen.insert(&entry.context) {
                return Err(SnapshotError::ValidationFailed(format!(
                    "entry {} repeats context {:?}",
                    i,
                    entry.context.symbols()
                )));
            }
        }
        Ok(())
    }
}

impl<S: Symbol + Serialize> ModelSnapshot<S> {
    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Encode with `bincode`.
    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }
}

impl<S: Symbol + DeserializeOwned> ModelSnapshot<S> {
    /// Decode from JSON. The snapshot is not validated until restored.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    /// Decode from `bincode`. The snapshot is not validated until restored.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }
}

impl<S: Symbol + Serialize> TransitionModel<S> {
    /// Serialize the model to JSON.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chordchain::builder::build;
    /// use chordchain::core::TransitionModel;
    ///
    /// let model = build(&[1u8, 5, 4, 1, 5, 1], 1).unwrap();
    /// let json = model.to_json().unwrap();
    ///
    /// let restored: TransitionModel<u8> = TransitionModel::from_json(&json).unwrap();
    /// assert_eq!(restored.observations(&[5]), Some(&[4, 1][..]));
    /// ```
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        ModelSnapshot::capture(self).to_json()
    }

    /// Serialize the model to a compact binary form.
    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        ModelSnapshot::capture(self).to_binary()
    }
}

impl<S: Symbol + DeserializeOwned> TransitionModel<S> {
    /// Restore a model serialized with [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        ModelSnapshot::from_json(json)?.restore()
    }

    /// Restore a model serialized with [`to_binary`](Self::to_binary).
    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        ModelSnapshot::from_binary(bytes)?.restore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoff::BackoffFloor;
    use crate::builder::build;

    fn sample() -> TransitionModel<String> {
        let corpus: Vec<String> = [
            "C:maj", "A:min", "F:maj", "G:7", "C:maj", "A:min", "D:min", "G:7",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        build(&corpus, 2).unwrap()
    }

    fn entries_of(model: &TransitionModel<String>) -> Vec<(Vec<String>, Vec<String>)> {
        model
            .entries()
            .map(|(c, o)| (c.symbols().to_vec(), o.to_vec()))
            .collect()
    }

    #[test]
    fn json_restores_identical_model() {
        let model = sample();
        let restored = TransitionModel::<String>::from_json(&model.to_json().unwrap()).unwrap();

        assert_eq!(restored.order(), model.order());
        assert_eq!(entries_of(&restored), entries_of(&model));
    }

    #[test]
    fn binary_restores_identical_model() {
        let model = sample();
        let bytes = model.to_binary().unwrap();
        let restored = TransitionModel::<String>::from_binary(&bytes).unwrap();

        assert_eq!(entries_of(&restored), entries_of(&model));
    }

    #[test]
    fn restored_model_rebuilds_backoff_levels() {
        let model = sample();
        let restored = TransitionModel::<String>::from_json(&model.to_json().unwrap()).unwrap();
        let context = vec!["E:min".to_string(), "A:min".to_string()];

        let before = model.backoff(&context, BackoffFloor::Stop).map(|m| m.pool.to_vec());
        let after = restored.backoff(&context, BackoffFloor::Stop).map(|m| m.pool.to_vec());
        assert!(before.is_some());
        assert_eq!(before, after);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut snapshot = ModelSnapshot::capture(&sample());
        snapshot.version = SNAPSHOT_VERSION + 1;

        let result = snapshot.restore();
        assert!(matches!(
            result,
            Err(SnapshotError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn wrong_context_length_is_rejected() {
        let mut snapshot = ModelSnapshot::capture(&sample());
        snapshot.entries[0].context = Context::new(vec!["C:maj".to_string()]);

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::ValidationFailed(_))
        ));
    }

    #[test]
    fn empty_observations_are_rejected() {
        let mut snapshot = ModelSnapshot::capture(&sample());
        snapshot.entries[1].observations.clear();

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::ValidationFailed(_))
        ));
    }

    #[test]
    fn repeated_context_is_rejected() {
        let mut snapshot = ModelSnapshot::capture(&sample());
        let duplicate = snapshot.entries[0].clone();
        snapshot.entries.push(duplicate);

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::ValidationFailed(_))
        ));
    }

    #[test]
    fn zero_order_is_rejected() {
        let snapshot: ModelSnapshot<String> = ModelSnapshot {
            version: SNAPSHOT_VERSION,
            created_at: Utc::now(),
            order: 0,
            entries: Vec::new(),
        };

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::ValidationFailed(_))
        ));
    }

    #[test]
    fn empty_model_survives_roundtrip() {
        let model = build(&["C:maj".to_string()], 2).unwrap();
        let restored = TransitionModel::<String>::from_binary(&model.to_binary().unwrap()).unwrap();

        assert!(restored.is_empty());
        assert_eq!(restored.order(), 2);
    }

    #[test]
    fn garbage_input_fails_to_decode() {
        let result = TransitionModel::<String>::from_json("not json");
        assert!(matches!(result, Err(SnapshotError::DeserializationFailed(_))));

        let result = TransitionModel::<String>::from_binary(&[0xff, 0x01]);
        assert!(matches!(result, Err(SnapshotError::DeserializationFailed(_))));
    }
}
