//! Response DTOs for the registry API
//!
//! Defines the structure of outgoing HTTP response bodies. `CarDto` is also
//! the value type held by the lookup cache.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{Car, Dealer};

/// Transfer object for one car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    pub id: i64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub dealer_id: i64,
}

impl From<&Car> for CarDto {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id,
            vin: car.vin.clone(),
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year,
            dealer_id: car.dealer_id,
        }
    }
}

/// Transfer object for one dealer with the cars it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealerDto {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub cars: Vec<CarDto>,
}

impl DealerDto {
    pub fn new(dealer: &Dealer, cars: &[Car]) -> Self {
        Self {
            id: dealer.id,
            name: dealer.name.clone(),
            address: dealer.address.clone(),
            cars: cars.iter().map(CarDto::from).collect(),
        }
    }
}

/// Plain confirmation for mutating endpoints
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for POST /cars/bulk
#[derive(Debug, Clone, Serialize)]
pub struct BulkAddResponse {
    pub message: String,
    /// Candidates left after dedup
    pub attempted: usize,
    pub saved: usize,
}

impl BulkAddResponse {
    pub fn new(attempted: usize, saved: usize) -> Self {
        Self {
            message: format!("{} cars saved successfully", saved),
            attempted,
            saved,
        }
    }
}

/// Response body for GET /cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub invalidations: u64,
    pub total_entries: usize,
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl CacheStatsResponse {
    pub fn new(stats: &CacheStats, capacity: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
            capacity,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_car() -> Car {
        Car {
            id: 7,
            vin: "V7".to_string(),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2018,
            dealer_id: 2,
        }
    }

    #[test]
    fn test_car_dto_from_entity() {
        let dto = CarDto::from(&sample_car());
        assert_eq!(dto.id, 7);
        assert_eq!(dto.vin, "V7");
        assert_eq!(dto.dealer_id, 2);
    }

    #[test]
    fn test_car_dto_serializes_camel_case() {
        let json = serde_json::to_string(&CarDto::from(&sample_car())).unwrap();
        assert!(json.contains("\"dealerId\":2"));
    }

    #[test]
    fn test_dealer_dto_lists_cars() {
        let dealer = Dealer {
            id: 2,
            name: "Auto House".to_string(),
            address: "Main St 1".to_string(),
        };
        let dto = DealerDto::new(&dealer, &[sample_car()]);
        assert_eq!(dto.cars.len(), 1);
        assert_eq!(dto.cars[0].vin, "V7");
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let mut stats = CacheStats::new();
        for _ in 0..4 {
            stats.record_hit();
        }
        stats.record_miss();
        let resp = CacheStatsResponse::new(&stats, 10);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.capacity, 10);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
