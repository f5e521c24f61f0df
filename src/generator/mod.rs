//! Generation: sampling new sequences from a trained model.
//!
//! A run resolves a starting context from the optional seed, then appends
//! one successor at a time. Each successor is drawn uniformly from the
//! observation pool of the longest trailing context the model knows, so a
//! symbol observed three times after a context is three times as likely as
//! one observed once.
//!
//! Randomness always comes from the caller. Passing the same seeded random
//! source, model, seed and length reproduces the same sequence.
//!
//! # Example
//!
//! ```rust
//! use chordchain::builder::build;
//! use chordchain::generator::{generate, SeedResolution};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let model = build(&["C", "F", "G", "C", "A", "F", "G", "C"], 1).unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//!
//! let generation = generate(&model, Some(&["C"][..]), 8, &mut rng).unwrap();
//! assert_eq!(generation.seed_resolution(), SeedResolution::Exact);
//! assert_eq!(generation.sequence()[0], "C");
//! assert_eq!(generation.len(), 8);
//! ```

pub mod error;
mod generation;
mod seed;

pub use error::GenerateError;
pub use generation::{Generation, StepOrigin};
pub use seed::SeedResolution;

use crate::backoff::{backoff, BackoffFloor};
use crate::config::{GenerationConfig, DEFAULT_TARGET_LENGTH};
use crate::core::{Symbol, TransitionModel};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use seed::resolve_start;
use tracing::debug;

/// Generate a sequence of `target_length` symbols from `model`.
///
/// Uses [`BackoffFloor::Stop`]: if even a single-symbol context has no
/// successor, generation stops early and the partial sequence is returned.
/// Use [`Generator`] to choose another floor.
///
/// # Errors
///
/// - [`GenerateError::EmptyModel`] if the model has no contexts
/// - [`GenerateError::ZeroLength`] if `target_length` is zero
/// - [`GenerateError::MalformedSeed`] if `seed` is `Some` but empty
pub fn generate<S, R>(
    model: &TransitionModel<S>,
    seed: Option<&[S]>,
    target_length: usize,
    rng: &mut R,
) -> Result<Generation<S>, GenerateError>
where
    S: Symbol,
    R: Rng + ?Sized,
{
    run_generation(model, seed, target_length, BackoffFloor::Stop, rng)
}

/// Reusable generation settings.
///
/// # Example
///
/// ```rust
/// use chordchain::backoff::BackoffFloor;
/// use chordchain::builder::build;
/// use chordchain::generator::Generator;
///
/// let model = build(&["C", "F", "G", "C", "F", "D"], 2).unwrap();
///
/// let generation = Generator::new(12)
///     .seed(["C", "F"])
///     .floor(BackoffFloor::AnySymbol)
///     .generate_seeded(&model, 42)
///     .unwrap();
///
/// // The any-symbol floor never runs dry.
/// assert_eq!(generation.len(), 12);
/// assert!(!generation.stopped_early());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Generator<S: Symbol> {
    target_length: usize,
    seed: Option<Vec<S>>,
    floor: BackoffFloor,
    rng_seed: Option<u64>,
}

impl<S: Symbol> Generator<S> {
    /// Create a generator producing `target_length` symbols.
    pub fn new(target_length: usize) -> Self {
        Self {
            target_length,
            seed: None,
            floor: BackoffFloor::default(),
            rng_seed: None,
        }
    }

    /// Create a generator with settings taken from configuration.
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            target_length: config.target_length,
            seed: None,
            floor: config.floor,
            rng_seed: config.rng_seed,
        }
    }

    /// Continue from these symbols instead of a random context.
    pub fn seed<I>(mut self, seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.seed = Some(seed.into_iter().collect());
        self
    }

    /// Set the behaviour once backoff runs out of context.
    pub fn floor(mut self, floor: BackoffFloor) -> Self {
        self.floor = floor;
        self
    }

    /// Fix the random seed used by [`run`](Self::run).
    pub fn rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = Some(rng_seed);
        self
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Generate using the caller's random source.
    pub fn generate<R>(
        &self,
        model: &TransitionModel<S>,
        rng: &mut R,
    ) -> Result<Generation<S>, GenerateError>
    where
        R: Rng + ?Sized,
    {
        run_generation(model, self.seed.as_deref(), self.target_length, self.floor, rng)
    }

    /// Generate with a ChaCha random source seeded from `rng_seed`.
    pub fn generate_seeded(
        &self,
        model: &TransitionModel<S>,
        rng_seed: u64,
    ) -> Result<Generation<S>, GenerateError> {
        let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
        self.generate(model, &mut rng)
    }

    /// Generate with the configured random seed, or a fresh one from the
    /// operating system if none was set.
    pub fn run(&self, model: &TransitionModel<S>) -> Result<Generation<S>, GenerateError> {
        let mut rng = match self.rng_seed {
            Some(rng_seed) => ChaCha8Rng::seed_from_u64(rng_seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.generate(model, &mut rng)
    }
}

impl<S: Symbol> Default for Generator<S> {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_LENGTH)
    }
}

/// Result of extending the sequence by one symbol.
enum StepResult<S> {
    /// A successor was sampled.
    Appended { symbol: S, origin: StepOrigin },

    /// No context, down to the floor, has a successor.
    NoSuccessor,
}

fn run_generation<S, R>(
    model: &TransitionModel<S>,
    seed: Option<&[S]>,
    target_length: usize,
    floor: BackoffFloor,
    rng: &mut R,
) -> Result<Generation<S>, GenerateError>
where
    S: Symbol,
    R: Rng + ?Sized,
{
    if model.is_empty() {
        return Err(GenerateError::EmptyModel);
    }
    if target_length == 0 {
        return Err(GenerateError::ZeroLength);
    }
    if seed.is_some_and(<[S]>::is_empty) {
        return Err(GenerateError::MalformedSeed);
    }

    let (start, seed_resolution) = resolve_start(model, seed, rng)?;
    let mut sequence = start.into_symbols();
    sequence.truncate(target_length);

    let mut origins = Vec::with_capacity(target_length - sequence.len());
    let mut stopped_early = false;

    while sequence.len() < target_length {
        match step(model, &sequence, floor, rng) {
            StepResult::Appended { symbol, origin } => {
                sequence.push(symbol);
                origins.push(origin);
            }
            StepResult::NoSuccessor => {
                debug!(
                    length = sequence.len(),
                    target_length, "no successor for trailing context, stopping early"
                );
                stopped_early = true;
                break;
            }
        }
    }

    let generation = Generation {
        sequence,
        target_length,
        seed_resolution,
        origins,
        stopped_early,
    };
    debug!(
        length = generation.len(),
        target_length,
        seed_resolution = ?generation.seed_resolution(),
        backoffs = generation.backoff_count(),
        "generated sequence"
    );
    Ok(generation)
}

fn step<S, R>(
    model: &TransitionModel<S>,
    sequence: &[S],
    floor: BackoffFloor,
    rng: &mut R,
) -> StepResult<S>
where
    S: Symbol,
    R: Rng + ?Sized,
{
    let order = model.order();
    let context = &sequence[sequence.len().saturating_sub(order)..];

    let Some(found) = backoff(model, context, floor) else {
        return StepResult::NoSuccessor;
    };
    let Some(symbol) = found.pool.choose(rng) else {
        return StepResult::NoSuccessor;
    };

    let origin = if found.order == order {
        StepOrigin::Exact
    } else {
        StepOrigin::BackedOff { order: found.order }
    };
    StepResult::Appended {
        symbol: symbol.clone(),
        origin,
    }
}
