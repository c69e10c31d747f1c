//! Dealer Service
//!
//! Dealer CRUD. Dealer reads are not cached; deleting a dealer removes its
//! cars and therefore invalidates the car lookup cache.

use std::sync::Arc;

use tracing::info;

use crate::cache::{CacheKey, SharedCache};
use crate::error::{AppError, Result};
use crate::models::{CarDto, Dealer, DealerDto, DealerRequest};
use crate::repository::{CarRepository, DealerRepository};

#[derive(Clone)]
pub struct DealerService {
    dealers: Arc<dyn DealerRepository>,
    cars: Arc<dyn CarRepository>,
    car_cache: SharedCache<CacheKey, CarDto>,
}

impl DealerService {
    pub fn new(
        dealers: Arc<dyn DealerRepository>,
        cars: Arc<dyn CarRepository>,
        car_cache: SharedCache<CacheKey, CarDto>,
    ) -> Self {
        Self {
            dealers,
            cars,
            car_cache,
        }
    }

    /// Registers a dealer. Names must be unique.
    pub fn add_dealer(&self, dealer: DealerRequest) -> Result<DealerDto> {
        let new_dealer = dealer.into_new_dealer();
        if self.dealers.find_by_name(&new_dealer.name)?.is_some() {
            return Err(AppError::DealerAlreadyExists(new_dealer.name));
        }

        let saved = self.dealers.insert(new_dealer)?;
        info!("Dealer {} added", saved.id);
        Ok(DealerDto::new(&saved, &[]))
    }

    pub fn get_dealer_by_id(&self, id: i64) -> Result<DealerDto> {
        let dealer = self
            .dealers
            .find_by_id(id)?
            .ok_or_else(|| AppError::DealerNotFound(format!("no dealer with id {}", id)))?;
        self.with_cars(&dealer)
    }

    pub fn get_dealer_by_name(&self, name: &str) -> Result<DealerDto> {
        let dealer = self.find_by_name(name)?;
        self.with_cars(&dealer)
    }

    /// Overwrites name and address of the dealer currently called `name`.
    /// The dealer keeps its cars.
    pub fn update_dealer(&self, name: &str, update: DealerRequest) -> Result<DealerDto> {
        let mut dealer = self.find_by_name(name)?;
        let update = update.into_new_dealer();

        if update.name != dealer.name {
            if let Some(other) = self.dealers.find_by_name(&update.name)? {
                if other.id != dealer.id {
                    return Err(AppError::DealerAlreadyExists(update.name));
                }
            }
        }

        dealer.name = update.name;
        dealer.address = update.address;
        let saved = self.dealers.update(dealer)?;

        info!("Dealer {} updated", saved.id);
        self.with_cars(&saved)
    }

    /// Deletes a dealer and, with it, all of its cars.
    pub fn delete_dealer(&self, id: i64) -> Result<()> {
        if !self.dealers.exists_by_id(id)? {
            return Err(AppError::DealerNotFound(format!("no dealer with id {}", id)));
        }

        self.dealers.delete_by_id(id)?;
        self.car_cache.invalidate_all();

        info!("Dealer {} deleted", id);
        Ok(())
    }

    fn find_by_name(&self, name: &str) -> Result<Dealer> {
        self.dealers
            .find_by_name(name)?
            .ok_or_else(|| AppError::DealerNotFound(format!("no dealer named {}", name)))
    }

    fn with_cars(&self, dealer: &Dealer) -> Result<DealerDto> {
        let cars = self.cars.find_by_dealer(dealer.id)?;
        Ok(DealerDto::new(dealer, &cars))
    }
}
