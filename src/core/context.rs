//! Fixed-length contexts used as transition keys.

use super::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// The most recent symbols preceding a prediction point.
///
/// Two contexts are equal iff every position matches. A context borrows as
/// a plain slice, so models can be queried with `&[S]` without allocating.
///
/// # Example
///
/// ```rust
/// use chordchain::core::Context;
///
/// let context = Context::new(vec!["A", "B", "C"]);
/// assert_eq!(context.len(), 3);
/// assert_eq!(context.suffix(2).symbols(), &["B", "C"]);
/// assert_eq!(context.last(), Some(&"C"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context<S> {
    symbols: Vec<S>,
}

impl<S: Symbol> Context<S> {
    /// Create a context from owned symbols.
    pub fn new(symbols: Vec<S>) -> Self {
        Self { symbols }
    }

    /// Create a context by cloning a slice.
    pub fn from_slice(symbols: &[S]) -> Self {
        Self {
            symbols: symbols.to_vec(),
        }
    }

    /// The empty context, used as the order-0 key.
    pub fn empty() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    /// Number of symbols in the context.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the context holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Borrow the symbols in order.
    pub fn symbols(&self) -> &[S] {
        &self.symbols
    }

    /// First (oldest) symbol.
    pub fn first(&self) -> Option<&S> {
        self.symbols.first()
    }

    /// Last (most recent) symbol.
    pub fn last(&self) -> Option<&S> {
        self.symbols.last()
    }

    /// The trailing `k` symbols as a new context.
    ///
    /// When `k` exceeds the context length the whole context is returned.
    pub fn suffix(&self, k: usize) -> Self {
        let start = self.symbols.len().saturating_sub(k);
        Self::from_slice(&self.symbols[start..])
    }

    /// Drop the oldest symbol, shortening the context by one.
    pub fn drop_first(&self) -> Self {
        self.suffix(self.symbols.len().saturating_sub(1))
    }

    /// Consume the context, returning its symbols.
    pub fn into_symbols(self) -> Vec<S> {
        self.symbols
    }
}

impl<S> Borrow<[S]> for Context<S> {
    fn borrow(&self) -> &[S] {
        &self.symbols
    }
}

impl<S: Symbol> From<Vec<S>> for Context<S> {
    fn from(symbols: Vec<S>) -> Self {
        Self::new(symbols)
    }
}

impl<S: Symbol> From<&[S]> for Context<S> {
    fn from(symbols: &[S]) -> Self {
        Self::from_slice(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn equality_requires_every_position() {
        let a = Context::new(vec!["A", "B"]);
        let b = Context::new(vec!["A", "B"]);
        let c = Context::new(vec!["B", "A"]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn suffix_keeps_trailing_symbols() {
        let context = Context::new(vec![1, 2, 3, 4]);

        assert_eq!(context.suffix(2).symbols(), &[3, 4]);
        assert_eq!(context.suffix(0).symbols(), &[] as &[i32]);
        assert_eq!(context.suffix(10).symbols(), &[1, 2, 3, 4]);
    }

    #[test]
    fn drop_first_shortens_by_one() {
        let context = Context::new(vec!["X", "Y", "Z"]);
        let shorter = context.drop_first();

        assert_eq!(shorter.symbols(), &["Y", "Z"]);
        assert_eq!(shorter.drop_first().drop_first(), Context::empty());
        assert_eq!(Context::<&str>::empty().drop_first(), Context::empty());
    }

    #[test]
    fn hash_map_lookup_by_slice() {
        let mut map = HashMap::new();
        map.insert(Context::new(vec!["A", "B"]), 7);

        let key: &[&str] = &["A", "B"];
        assert_eq!(map.get(key), Some(&7));
        let missing: &[&str] = &["B", "A"];
        assert_eq!(map.get(missing), None);
    }

    #[test]
    fn context_serializes_as_plain_list() {
        let context = Context::new(vec![0u8, 4, 7]);
        let json = serde_json::to_string(&context).unwrap();
        assert_eq!(json, "[0,4,7]");

        let back: Context<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, context);
    }
}
