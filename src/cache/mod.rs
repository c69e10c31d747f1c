//! Cache Module
//!
//! Bounded in-memory lookup cache with LRU eviction, consulted before the
//! repository on reads and invalidated after every mutation.

mod key;
mod lru;
mod shared;
mod stats;
mod store;
mod value;


// Re-export public types
pub use key::CacheKey;
pub use lru::LruTracker;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::BoundedCache;
pub use value::CachedValue;

// == Public Constants ==
/// Default capacity of the car lookup cache
pub const DEFAULT_CACHE_CAPACITY: usize = 10;
