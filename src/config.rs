//! Engine configuration.
//!
//! Settings for training and generation, typically loaded from a JSON file
//! by whatever drives the engine. Every field has a default, so a partial
//! (or empty) document is valid.

use crate::backoff::BackoffFloor;
use crate::builder::DEFAULT_ORDER;
use serde::{Deserialize, Serialize};

/// Default number of symbols to generate.
pub const DEFAULT_TARGET_LENGTH: usize = 128;

/// Training settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Context order of the model. Must be at least 1.
    pub order: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
        }
    }
}

/// Generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Total length of the generated sequence, starting context included.
    pub target_length: usize,

    /// Behaviour once backoff runs out of context.
    pub floor: BackoffFloor,

    /// Seed for the random source. If None, a fresh seed is drawn from the
    /// operating system on every run.
    pub rng_seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            target_length: DEFAULT_TARGET_LENGTH,
            floor: BackoffFloor::default(),
            rng_seed: None,
        }
    }
}

/// Complete engine configuration.
///
/// # Example
///
/// ```rust
/// use chordchain::backoff::BackoffFloor;
/// use chordchain::config::EngineConfig;
///
/// let config = EngineConfig::from_json(
///     r#"{ "training": { "order": 3 }, "generation": { "floor": "any_symbol" } }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.training.order, 3);
/// assert_eq!(config.generation.floor, BackoffFloor::AnySymbol);
/// assert_eq!(config.generation.target_length, 128);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub training: TrainingConfig,
    pub generation: GenerationConfig,
}

impl EngineConfig {
    /// Parse configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
