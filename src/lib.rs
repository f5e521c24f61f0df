//! Chordchain: a variable-order Markov chain engine
//!
//! Chordchain learns which symbols follow which contexts in a corpus of
//! sequences (chord progressions, in the use it was written for) and samples
//! new sequences with the same local shape. When a generated context was
//! never seen in training, the engine backs off to shorter and shorter
//! contexts until one was.
//!
//! The engine is generic over the symbol type. Anything that is cloneable
//! and hashable can be learned from; [`PitchSet`] is provided as a
//! canonical chord symbol.
//!
//! # Core Concepts
//!
//! - **Model**: an immutable [`TransitionModel`] built once by the
//!   [`builder`] and shared between threads when its symbols are
//! - **Generation**: [`generator::generate`] with an explicit random source
//! - **Backoff**: precomputed lower-order levels, see [`backoff`]
//! - **Snapshots**: JSON or binary persistence, see [`snapshot`]
//!
//! # Example
//!
//! ```rust
//! use chordchain::builder::build;
//! use chordchain::generator::generate;
//! use rand::rngs::mock::StepRng;
//!
//! let corpus = ["A", "B", "C", "B", "C", "D", "A", "B", "C"];
//! let model = build(&corpus, 2).unwrap();
//!
//! // A random source that always picks the first candidate.
//! let mut rng = StepRng::new(0, 0);
//! let generation = generate(&model, Some(&["A", "B"][..]), 5, &mut rng).unwrap();
//!
//! assert_eq!(generation.sequence(), &["A", "B", "C", "B", "C"]);
//! ```

pub mod backoff;
pub mod builder;
pub mod config;
pub mod core;
pub mod generator;
pub mod snapshot;

// Re-export commonly used types
pub use backoff::BackoffFloor;
pub use builder::{build, BuildError, ModelBuilder};
pub use config::EngineConfig;
pub use crate::core::{Context, PitchSet, Symbol, TransitionModel};
pub use generator::{generate, GenerateError, Generation, Generator};
pub use snapshot::{ModelSnapshot, SnapshotError};
