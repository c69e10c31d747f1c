//! Cache Key Module
//!
//! Keys under which car lookups are memoized.

use std::fmt;

// == Cache Key ==
/// Identifies one memoized car lookup.
///
/// Each lookup kind lives in its own variant, so an id of `5` and a make
/// of `"5"` never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Lookup by surrogate id
    Id(i64),
    /// Lookup by VIN
    Vin(String),
    /// Lookup by make
    Make(String),
    /// Multi-row lookup by owning dealer and model year
    DealerYear { dealer_id: i64, year: i32 },
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Id(id) => write!(f, "id_{}", id),
            CacheKey::Vin(vin) => write!(f, "vin_{}", vin),
            CacheKey::Make(make) => write!(f, "make_{}", make),
            CacheKey::DealerYear { dealer_id, year } => {
                write!(f, "dealer_{}_year_{}", dealer_id, year)
            }
        }
    }
}
