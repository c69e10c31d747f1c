//! Car Service
//!
//! Car CRUD, cache-first lookups and the bulk import workflow.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, error, info};

use crate::cache::{CacheKey, SharedCache};
use crate::error::{AppError, Result};
use crate::models::{Car, CarDto, CarRequest, Dealer, NewCar};
use crate::repository::{CarRepository, DealerRepository, RepositoryError};

/// Outcome of a fully successful bulk add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkAddReport {
    /// Candidates left after dropping known and repeated VINs
    pub attempted: usize,
    pub saved: usize,
}

// == Car Service ==
/// Orchestrates car operations against the repositories and the lookup cache.
///
/// Reads consult the cache first and populate it on a miss. Every successful
/// mutation invalidates the whole cache, strictly after the repository write
/// returned.
#[derive(Clone)]
pub struct CarService {
    cars: Arc<dyn CarRepository>,
    dealers: Arc<dyn DealerRepository>,
    cache: SharedCache<CacheKey, CarDto>,
}

impl CarService {
    pub fn new(
        cars: Arc<dyn CarRepository>,
        dealers: Arc<dyn DealerRepository>,
        cache: SharedCache<CacheKey, CarDto>,
    ) -> Self {
        Self {
            cars,
            dealers,
            cache,
        }
    }

    /// Handle to the lookup cache this service reads through.
    pub fn cache(&self) -> &SharedCache<CacheKey, CarDto> {
        &self.cache
    }

    // == Add ==
    /// Adds one car to an existing dealer.
    ///
    /// Fails with `DealerNotFound` for an unknown dealer and with
    /// `CarAlreadyExists` if the VIN is already stored for any dealer.
    pub fn add_car(&self, dealer_id: i64, car: CarRequest) -> Result<CarDto> {
        let dealer = self.require_dealer(dealer_id)?;
        let new_car = car.into_new_car(dealer.id);

        if self.cars.find_by_vin(&new_car.vin)?.is_some() {
            return Err(AppError::CarAlreadyExists(new_car.vin));
        }

        let vin = new_car.vin.clone();
        let saved = self
            .cars
            .insert(new_car)
            .map_err(|err| vin_conflict(err, &vin))?;
        self.cache.invalidate_all();

        info!("Car {} added for dealer {}", saved.id, dealer.id);
        Ok(CarDto::from(&saved))
    }

    // == Bulk Add ==
    /// Adds a batch of cars to one dealer, skipping VINs already stored
    /// anywhere and collapsing repeated VINs within the batch (the later
    /// entry wins, at the position of the first occurrence).
    ///
    /// Outcomes:
    /// - nothing left to save, or nothing saved: `CarAlreadyExists`
    /// - everything saved: `Ok`
    /// - some saved: `BulkAdditionFailed`; the saved cars stay persisted
    pub fn add_cars_bulk(&self, dealer_id: i64, cars: Vec<CarRequest>) -> Result<BulkAddReport> {
        let dealer = self.require_dealer(dealer_id)?;

        let existing: HashSet<String> = self
            .cars
            .find_all()?
            .into_iter()
            .map(|car| car.vin)
            .collect();

        let mut candidates: IndexMap<String, NewCar> = IndexMap::new();
        for car in cars {
            let new_car = car.into_new_car(dealer.id);
            if existing.contains(&new_car.vin) {
                continue;
            }
            candidates.insert(new_car.vin.clone(), new_car);
        }

        let attempted = candidates.len();
        if attempted == 0 {
            info!("Bulk add for dealer {}: every car already exists", dealer.id);
            return Err(AppError::CarAlreadyExists(
                "all cars in the batch already exist".to_string(),
            ));
        }

        let saved = self.cars.insert_all(candidates.into_values().collect())?.len();
        if saved > 0 {
            self.cache.invalidate_all();
        }

        if saved == 0 {
            Err(AppError::CarAlreadyExists(
                "none of the cars in the batch could be saved".to_string(),
            ))
        } else if saved == attempted {
            info!("Successfully added {} new cars for dealer {}", saved, dealer.id);
            Ok(BulkAddReport { attempted, saved })
        } else {
            error!(
                "Bulk add for dealer {} incomplete: saved {} of {} cars",
                dealer.id, saved, attempted
            );
            Err(AppError::BulkAdditionFailed { attempted, saved })
        }
    }

    // == Lookups ==
    /// Car by id, served from the cache when present.
    pub fn get_car_by_id(&self, id: i64) -> Result<CarDto> {
        self.cached_lookup(
            CacheKey::Id(id),
            || self.cars.find_by_id(id),
            || format!("no car with id {}", id),
        )
    }

    /// Car by VIN, served from the cache when present.
    pub fn get_car_by_vin(&self, vin: &str) -> Result<CarDto> {
        self.cached_lookup(
            CacheKey::Vin(vin.to_string()),
            || self.cars.find_by_vin(vin),
            || format!("no car with VIN {}", vin),
        )
    }

    /// First stored car of the given make, served from the cache when present.
    pub fn get_car_by_make(&self, make: &str) -> Result<CarDto> {
        self.cached_lookup(
            CacheKey::Make(make.to_string()),
            || self.cars.find_by_make(make),
            || format!("no car with make {}", make),
        )
    }

    /// All cars of one dealer with the given model year.
    ///
    /// An empty result is `CarNotFound`, whether or not the dealer exists.
    pub fn get_cars_by_dealer_and_year(&self, dealer_id: i64, year: i32) -> Result<Vec<CarDto>> {
        let key = CacheKey::DealerYear { dealer_id, year };
        if let Some(cars) = self.cache.get_list(&key) {
            debug!("Cache hit for {}", key);
            return Ok(cars);
        }

        let cars = self.cars.find_by_dealer_and_year(dealer_id, year)?;
        if cars.is_empty() {
            return Err(AppError::CarNotFound(format!(
                "no cars for dealer {} in year {}",
                dealer_id, year
            )));
        }

        let dtos: Vec<CarDto> = cars.iter().map(CarDto::from).collect();
        self.cache.put_list(key, dtos.clone());
        Ok(dtos)
    }

    fn cached_lookup(
        &self,
        key: CacheKey,
        fetch: impl FnOnce() -> std::result::Result<Option<Car>, RepositoryError>,
        not_found: impl FnOnce() -> String,
    ) -> Result<CarDto> {
        if let Some(dto) = self.cache.get_single(&key) {
            debug!("Cache hit for {}", key);
            return Ok(dto);
        }

        let car = fetch()?.ok_or_else(|| AppError::CarNotFound(not_found()))?;
        let dto = CarDto::from(&car);
        self.cache.put(key, dto.clone());
        Ok(dto)
    }

    // == Update ==
    /// Overwrites VIN, make, model and year of an existing car.
    pub fn update_car(&self, id: i64, update: CarRequest) -> Result<CarDto> {
        let mut car = self
            .cars
            .find_by_id(id)?
            .ok_or_else(|| AppError::CarNotFound(format!("no car with id {}", id)))?;

        let vin = update.vin.trim().to_string();
        if vin != car.vin {
            if let Some(other) = self.cars.find_by_vin(&vin)? {
                if other.id != id {
                    return Err(AppError::CarAlreadyExists(vin));
                }
            }
        }

        car.vin = vin;
        car.make = update.make;
        car.model = update.model;
        car.year = update.year;

        let vin = car.vin.clone();
        let saved = self
            .cars
            .update(car)
            .map_err(|err| vin_conflict(err, &vin))?;
        self.cache.invalidate_all();

        info!("Car {} updated", id);
        Ok(CarDto::from(&saved))
    }

    // == Delete ==
    /// Deletes a car by id. Fails with `CarNotFound` if there is none.
    pub fn delete_car(&self, id: i64) -> Result<()> {
        if !self.cars.exists_by_id(id)? {
            return Err(AppError::CarNotFound(format!("no car with id {}", id)));
        }

        self.cars.delete_by_id(id)?;
        self.cache.invalidate_all();

        info!("Car {} deleted", id);
        Ok(())
    }

    // == Transfer ==
    /// Moves a car to another dealer without touching its other fields.
    pub fn transfer_car(&self, car_id: i64, dealer_id: i64) -> Result<CarDto> {
        let mut car = self
            .cars
            .find_by_id(car_id)?
            .ok_or_else(|| AppError::CarNotFound(format!("no car with id {}", car_id)))?;
        let dealer = self.require_dealer(dealer_id)?;

        car.dealer_id = dealer.id;
        let saved = self.cars.update(car)?;
        self.cache.invalidate_all();

        info!("Car {} transferred to dealer {}", car_id, dealer.id);
        Ok(CarDto::from(&saved))
    }

    fn require_dealer(&self, dealer_id: i64) -> Result<Dealer> {
        self.dealers
            .find_by_id(dealer_id)?
            .ok_or_else(|| AppError::DealerNotFound(format!("no dealer with id {}", dealer_id)))
    }
}

/// A unique violation lost to a concurrent writer still reads as a duplicate.
fn vin_conflict(err: RepositoryError, vin: &str) -> AppError {
    match err {
        RepositoryError::UniqueViolation(_) => AppError::CarAlreadyExists(vin.to_string()),
        other => other.into(),
    }
}
