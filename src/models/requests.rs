//! Request DTOs for the registry API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::models::{NewCar, NewDealer};

/// Maximum VIN length (ISO 3779)
pub const MAX_VIN_LENGTH: usize = 17;

/// Earliest accepted model year
pub const MIN_MODEL_YEAR: i32 = 1886;

/// Body of car create, bulk create and update requests.
///
/// # Fields
/// - `vin`: Vehicle identification number, unique across all dealers
/// - `make`, `model`: Descriptive fields
/// - `year`: Model year
#[derive(Debug, Clone, Deserialize)]
pub struct CarRequest {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl CarRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let vin = self.vin.trim();
        if vin.is_empty() {
            return Some("VIN cannot be empty".to_string());
        }
        if vin.chars().count() > MAX_VIN_LENGTH {
            return Some(format!(
                "VIN exceeds maximum length of {} characters",
                MAX_VIN_LENGTH
            ));
        }
        if self.make.trim().is_empty() {
            return Some("Make cannot be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Some("Model cannot be empty".to_string());
        }
        let latest = Utc::now().year() + 1;
        if self.year < MIN_MODEL_YEAR || self.year > latest {
            return Some(format!(
                "Year must be between {} and {}",
                MIN_MODEL_YEAR, latest
            ));
        }
        None
    }

    /// Converts into an unsaved car owned by `dealer_id`.
    pub fn into_new_car(self, dealer_id: i64) -> NewCar {
        NewCar {
            vin: self.vin.trim().to_string(),
            make: self.make,
            model: self.model,
            year: self.year,
            dealer_id,
        }
    }
}

/// Validates every car of a bulk request, reporting the first bad index.
pub fn validate_bulk(cars: &[CarRequest]) -> Option<String> {
    cars.iter()
        .enumerate()
        .find_map(|(index, car)| car.validate().map(|msg| format!("cars[{}]: {}", index, msg)))
}

/// Body of dealer create and update requests.
#[derive(Debug, Clone, Deserialize)]
pub struct DealerRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

impl DealerRequest {
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Dealer name cannot be empty".to_string());
        }
        None
    }

    pub fn into_new_dealer(self) -> NewDealer {
        NewDealer {
            name: self.name.trim().to_string(),
            address: self.address,
        }
    }
}

// == Query Strings ==

/// `?id=`
#[derive(Debug, Clone, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

/// `?dealerId=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerIdQuery {
    pub dealer_id: i64,
}

/// `?vin=`
#[derive(Debug, Clone, Deserialize)]
pub struct VinQuery {
    pub vin: String,
}

/// `?make=`
#[derive(Debug, Clone, Deserialize)]
pub struct MakeQuery {
    pub make: String,
}

/// `?name=`
#[derive(Debug, Clone, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// `?carId=&dealerId=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferQuery {
    pub car_id: i64,
    pub dealer_id: i64,
}

/// `?dealerId=&year=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerYearQuery {
    pub dealer_id: i64,
    pub year: i32,
}
