//! Cached Value Module
//!
//! A cache slot holds either one transfer object or an ordered list of them.

// == Cached Value ==
/// Value stored under a cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue<V> {
    /// Result of a single-row lookup
    Single(V),
    /// Result of a multi-row lookup, in repository order
    List(Vec<V>),
}

impl<V> CachedValue<V> {
    /// Returns the single value, if this slot holds one.
    pub fn as_single(&self) -> Option<&V> {
        match self {
            CachedValue::Single(value) => Some(value),
            CachedValue::List(_) => None,
        }
    }

    /// Returns the list, if this slot holds one.
    pub fn as_list(&self) -> Option<&[V]> {
        match self {
            CachedValue::Single(_) => None,
            CachedValue::List(values) => Some(values),
        }
    }
}
