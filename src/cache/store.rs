//! Bounded Cache Module
//!
//! Capacity-limited lookup cache combining HashMap storage with LRU tracking.

use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::{CacheStats, CachedValue, LruTracker};

// == Bounded Cache ==
/// Key to value (or key to list-of-values) store with LRU eviction.
///
/// Every `get`, `put`, `put_list` and `contains_key` on a present key
/// promotes that key to most recently used. When an insertion pushes the
/// entry count past `max_entries`, exactly one entry, the least recently
/// used one, is evicted. The entry just inserted is never the victim.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, CachedValue<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Lookup statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new cache holding at most `max_entries` keys.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    // == Get ==
    /// Returns the cached value for an exact key match and promotes it.
    pub fn get(&mut self, key: &K) -> Option<&CachedValue<V>> {
        if self.entries.contains_key(key) {
            self.stats.record_hit();
            self.lru.touch(key);
            self.entries.get(key)
        } else {
            self.stats.record_miss();
            None
        }
    }

    /// Returns a clone of the single value stored under `key`.
    pub fn get_single(&mut self, key: &K) -> Option<V> {
        self.get(key).and_then(|value| value.as_single().cloned())
    }

    /// Returns a clone of the list stored under `key`.
    pub fn get_list(&mut self, key: &K) -> Option<Vec<V>> {
        self.get(key).and_then(|value| value.as_list().map(<[V]>::to_vec))
    }

    // == Put ==
    /// Inserts or overwrites a single-value mapping.
    ///
    /// Returns the key evicted to make room, if any.
    pub fn put(&mut self, key: K, value: V) -> Option<K> {
        self.insert(key, CachedValue::Single(value))
    }

    /// Inserts or overwrites a list mapping. Order and duplicates are kept.
    ///
    /// Returns the key evicted to make room, if any.
    pub fn put_list(&mut self, key: K, values: Vec<V>) -> Option<K> {
        self.insert(key, CachedValue::List(values))
    }

    fn insert(&mut self, key: K, value: CachedValue<V>) -> Option<K> {
        // Touch first so the new key is the most recent before any eviction
        self.lru.touch(&key);
        self.entries.insert(key, value);

        let mut evicted = None;
        if self.entries.len() > self.max_entries {
            if let Some(oldest) = self.lru.evict_oldest() {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
                evicted = Some(oldest);
            }
        }

        debug_assert_eq!(self.lru.len(), self.entries.len());
        self.stats.set_total_entries(self.entries.len());
        evicted
    }

    // == Contains Key ==
    /// Membership check. A present key is promoted, like any other access.
    pub fn contains_key(&mut self, key: &K) -> bool {
        let present = self.entries.contains_key(key);
        debug_assert_eq!(present, self.lru.contains(key));
        if present {
            self.lru.touch(key);
        }
        present
    }

    // == Evict ==
    /// Removes a single key. Absent keys are ignored.
    pub fn evict(&mut self, key: &K) {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    /// Drops every entry after a mutation of the backing store.
    pub fn invalidate_all(&mut self) {
        self.clear();
        self.stats.record_invalidation();
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
