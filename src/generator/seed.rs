//! Choosing the starting context for a generation run.

use crate::core::{Context, Symbol, TransitionModel};
use crate::generator::error::GenerateError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the starting context of a run was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedResolution {
    /// No seed was given; a context was picked uniformly at random.
    Random,

    /// The seed's trailing symbols are a learned context.
    Exact,

    /// The seed was shorter than the model order and a learned context
    /// ending in the seed's first symbol was picked.
    SuffixMatch,

    /// The seed matched nothing; a context was picked uniformly at random.
    Fallback,
}

/// Resolve `seed` to a learned context of exactly `model.order()` symbols.
///
/// Callers have already rejected empty seeds.
pub(crate) fn resolve_start<S, R>(
    model: &TransitionModel<S>,
    seed: Option<&[S]>,
    rng: &mut R,
) -> Result<(Context<S>, SeedResolution), GenerateError>
where
    S: Symbol,
    R: Rng + ?Sized,
{
    let Some(seed) = seed else {
        return Ok((random_context(model, rng)?, SeedResolution::Random));
    };

    let order = model.order();
    if seed.len() >= order {
        let candidate = &seed[seed.len() - order..];
        if model.contains(candidate) {
            return Ok((Context::from_slice(candidate), SeedResolution::Exact));
        }
        return Ok((random_context(model, rng)?, SeedResolution::Fallback));
    }

    // Shorter than the order: look for contexts that lead into the seed.
    let Some(first) = seed.first() else {
        return Err(GenerateError::MalformedSeed);
    };
    let openings: Vec<&Context<S>> = model
        .contexts()
        .filter(|context| context.last() == Some(first))
        .collect();

    match openings.choose(rng) {
        Some(context) => Ok(((*context).clone(), SeedResolution::SuffixMatch)),
        None => Ok((random_context(model, rng)?, SeedResolution::Fallback)),
    }
}

fn random_context<S, R>(
    model: &TransitionModel<S>,
    rng: &mut R,
) -> Result<Context<S>, GenerateError>
where
    S: Symbol,
    R: Rng + ?Sized,
{
    if model.is_empty() {
        return Err(GenerateError::EmptyModel);
    }
    let slot = rng.gen_range(0..model.len());
    model
        .context_at(slot)
        .cloned()
        .ok_or(GenerateError::EmptyModel)
}
