//! The `Symbol` trait for values the engine can learn from.

use std::fmt::Debug;
use std::hash::Hash;

/// An opaque unit in a training or generated sequence.
///
/// The engine only ever compares and hashes symbols, so any value that is
/// cloneable and hashable qualifies. The trait is implemented automatically;
/// there is nothing to write by hand.
///
/// Thread safety is not required here. A model is `Send + Sync` exactly when
/// its symbol type is, so `Rc<str>` symbols work on one thread and `String`
/// symbols can be shared behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use chordchain::core::Symbol;
///
/// fn accepts<S: Symbol>(_s: S) {}
///
/// accepts("C:maj");
/// accepts(String::from("G:7"));
/// accepts(vec![0u8, 4, 7]);
/// ```
pub trait Symbol: Clone + Eq + Hash + Debug {}

impl<T> Symbol for T where T: Clone + Eq + Hash + Debug {}
