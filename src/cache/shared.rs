//! Shared Cache Handle
//!
//! Thread-safe handle over a `BoundedCache`, cloned into every component
//! that needs the lookup cache.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{BoundedCache, CacheStats};

/// Cloneable handle to one `BoundedCache` behind a single mutex.
///
/// Each call takes the lock once and returns owned values, so no guard
/// outlives the call.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<BoundedCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    // == Constructor ==
    /// Creates a handle to a fresh cache holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BoundedCache::new(max_entries))),
        }
    }

    // == Get ==
    /// Cloned single value for `key`, promoting it on a hit.
    pub fn get_single(&self, key: &K) -> Option<V> {
        self.inner.lock().get_single(key)
    }

    /// Cloned list for `key`, promoting it on a hit.
    pub fn get_list(&self, key: &K) -> Option<Vec<V>> {
        self.inner.lock().get_list(key)
    }

    // == Put ==
    /// Stores a single value, evicting the least recently used key if full.
    pub fn put(&self, key: K, value: V) {
        let evicted = self.inner.lock().put(key, value);
        log_eviction(evicted);
    }

    /// Stores a list of values under one key.
    pub fn put_list(&self, key: K, values: Vec<V>) {
        let evicted = self.inner.lock().put_list(key, values);
        log_eviction(evicted);
    }

    // == Contains Key ==
    /// Membership check; a hit counts as an access.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().contains_key(key)
    }

    // == Evict ==
    /// Drops one key if present.
    pub fn evict(&self, key: &K) {
        self.inner.lock().evict(key);
    }

    // == Invalidate ==
    /// Drops every cached lookup. Call only after the store write succeeded.
    pub fn invalidate_all(&self) {
        self.inner.lock().invalidate_all();
        debug!("Lookup cache invalidated");
    }

    // == Stats ==
    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Number of cached keys.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

fn log_eviction<K: Debug>(evicted: Option<K>) {
    if let Some(key) = evicted {
        debug!(key = ?key, "Lookup cache evicted least recently used entry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let cache: SharedCache<i64, String> = SharedCache::new(10);
        let other = cache.clone();

        cache.put(1, "one".to_string());

        assert_eq!(other.get_single(&1), Some("one".to_string()));
        other.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_puts_respect_capacity() {
        let cache: SharedCache<i64, i64> = SharedCache::new(16);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        cache.put(t * 1000 + i, i);
                        let _ = cache.get_single(&(t * 1000 + i));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 16);
        assert_eq!(cache.stats().evictions, 8 * 100 - 16);
    }

    #[test]
    fn test_evict_and_contains() {
        let cache: SharedCache<&'static str, i32> = SharedCache::new(4);
        cache.put_list("list", vec![1, 2, 2]);

        assert!(cache.contains_key(&"list"));
        assert_eq!(cache.get_list(&"list"), Some(vec![1, 2, 2]));

        cache.evict(&"list");
        assert!(!cache.contains_key(&"list"));
    }

    #[test]
    fn test_eviction_releases_lock_for_other_threads() {
        let cache: SharedCache<i64, i64> = SharedCache::new(1);
        cache.put(1, 1);
        cache.put_list(2, vec![2]);

        let other = cache.clone();
        let seen = thread::spawn(move || {
            other.put(3, 3);
            other.get_single(&3)
        })
        .join()
        .unwrap();

        assert_eq!(seen, Some(3));
        assert!(!cache.contains_key(&2));
        assert_eq!(cache.stats().evictions, 2);
    }
}
