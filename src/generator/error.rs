//! Errors raised before generation starts.

use thiserror::Error;

/// Errors that prevent a generation run from starting.
///
/// Running out of successors part-way through is not an error; see
/// [`crate::generator::Generation::stopped_early`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("Model has no contexts. Train on a sequence longer than the model order")]
    EmptyModel,

    #[error("Seed contains no symbols. Pass None to start from a random context")]
    MalformedSeed,

    #[error("Target length must be at least 1")]
    ZeroLength,
}
