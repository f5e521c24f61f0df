//! Core Markov chain types.
//!
//! This module contains the data model shared by training and generation:
//! - Symbols via the blanket `Symbol` trait
//! - Fixed-length `Context` tuples
//! - The immutable `TransitionModel`
//! - `PitchSet`, a ready-made chord symbol
//!
//! Nothing in this module performs I/O or draws random numbers.

mod context;
mod model;
mod pitch;
mod symbol;
mod table;

pub use context::Context;
pub use model::TransitionModel;
pub use pitch::PitchSet;
pub use symbol::Symbol;
pub(crate) use table::TransitionTable;
