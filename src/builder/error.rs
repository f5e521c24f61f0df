//! Errors raised while building a transition model.

use thiserror::Error;

/// Errors that can occur when building a transition model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Context order must be at least 1 (got {order})")]
    InvalidOrder { order: usize },
}
