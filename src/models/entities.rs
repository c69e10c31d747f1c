//! Persistent entities
//!
//! Rows as the repository stores them. A `NewCar`/`NewDealer` has no id
//! yet; the repository assigns one on insert.

// == Car ==
/// A car row. `vin` is unique across the whole store, not per dealer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: i64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Owning dealer
    pub dealer_id: i64,
}

/// A car that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub dealer_id: i64,
}

impl NewCar {
    /// Attaches a generated id.
    pub fn with_id(self, id: i64) -> Car {
        Car {
            id,
            vin: self.vin,
            make: self.make,
            model: self.model,
            year: self.year,
            dealer_id: self.dealer_id,
        }
    }
}

// == Dealer ==
/// A dealer row. Owns its cars; deleting it deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dealer {
    pub id: i64,
    /// Alternate lookup key, kept unique by the dealer service
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDealer {
    pub name: String,
    pub address: String,
}

impl NewDealer {
    pub fn with_id(self, id: i64) -> Dealer {
        Dealer {
            id,
            name: self.name,
            address: self.address,
        }
    }
}
