//! In-Memory Store
//!
//! Process-local implementation of both repositories, sharing one state so
//! dealer deletion can cascade to cars.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::warn;

use crate::models::{Car, Dealer, NewCar, NewDealer};
use crate::repository::{CarRepository, DealerRepository, RepoResult, RepositoryError};

#[derive(Debug)]
struct StoreState {
    cars: BTreeMap<i64, Car>,
    dealers: BTreeMap<i64, Dealer>,
    next_car_id: i64,
    next_dealer_id: i64,
}

impl StoreState {
    fn vin_taken(&self, vin: &str, except: Option<i64>) -> bool {
        self.cars
            .values()
            .any(|car| car.vin == vin && Some(car.id) != except)
    }

    fn check_new_car(&self, car: &NewCar) -> RepoResult<()> {
        if !self.dealers.contains_key(&car.dealer_id) {
            return Err(RepositoryError::MissingDealer(car.dealer_id));
        }
        if self.vin_taken(&car.vin, None) {
            return Err(RepositoryError::UniqueViolation(car.vin.clone()));
        }
        Ok(())
    }

    fn store_new_car(&mut self, car: NewCar) -> Car {
        let id = self.next_car_id;
        self.next_car_id += 1;
        let car = car.with_id(id);
        self.cars.insert(id, car.clone());
        car
    }
}

// == In-Memory Store ==
/// Repository backed by ordered maps behind a single `RwLock`.
///
/// Ids start at 1 and are never reused. Enforces VIN uniqueness and the
/// car to dealer reference on every write.
#[derive(Debug)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                cars: BTreeMap::new(),
                dealers: BTreeMap::new(),
                next_car_id: 1,
                next_dealer_id: 1,
            }),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CarRepository for InMemoryStore {
    fn find_by_id(&self, id: i64) -> RepoResult<Option<Car>> {
        Ok(self.state.read().cars.get(&id).cloned())
    }

    fn find_by_vin(&self, vin: &str) -> RepoResult<Option<Car>> {
        let state = self.state.read();
        Ok(state.cars.values().find(|car| car.vin == vin).cloned())
    }

    fn find_by_make(&self, make: &str) -> RepoResult<Option<Car>> {
        let state = self.state.read();
        Ok(state.cars.values().find(|car| car.make == make).cloned())
    }

    fn find_all(&self) -> RepoResult<Vec<Car>> {
        Ok(self.state.read().cars.values().cloned().collect())
    }

    fn find_by_dealer(&self, dealer_id: i64) -> RepoResult<Vec<Car>> {
        let state = self.state.read();
        Ok(state
            .cars
            .values()
            .filter(|car| car.dealer_id == dealer_id)
            .cloned()
            .collect())
    }

    fn find_by_dealer_and_year(&self, dealer_id: i64, year: i32) -> RepoResult<Vec<Car>> {
        let state = self.state.read();
        Ok(state
            .cars
            .values()
            .filter(|car| car.dealer_id == dealer_id && car.year == year)
            .cloned()
            .collect())
    }

    fn insert(&self, car: NewCar) -> RepoResult<Car> {
        let mut state = self.state.write();
        state.check_new_car(&car)?;
        Ok(state.store_new_car(car))
    }

    fn insert_all(&self, cars: Vec<NewCar>) -> RepoResult<Vec<Car>> {
        let mut state = self.state.write();
        let mut saved = Vec::with_capacity(cars.len());

        for car in cars {
            // Rows violating a constraint are skipped, the rest still land
            if let Err(err) = state.check_new_car(&car) {
                warn!("Skipping car during batch insert: {}", err);
                continue;
            }
            saved.push(state.store_new_car(car));
        }

        Ok(saved)
    }

    fn update(&self, car: Car) -> RepoResult<Car> {
        let mut state = self.state.write();
        if !state.cars.contains_key(&car.id) {
            return Err(RepositoryError::MissingRow(car.id));
        }
        if !state.dealers.contains_key(&car.dealer_id) {
            return Err(RepositoryError::MissingDealer(car.dealer_id));
        }
        if state.vin_taken(&car.vin, Some(car.id)) {
            return Err(RepositoryError::UniqueViolation(car.vin));
        }
        state.cars.insert(car.id, car.clone());
        Ok(car)
    }

    fn exists_by_id(&self, id: i64) -> RepoResult<bool> {
        Ok(self.state.read().cars.contains_key(&id))
    }

    fn delete_by_id(&self, id: i64) -> RepoResult<()> {
        self.state.write().cars.remove(&id);
        Ok(())
    }
}

impl DealerRepository for InMemoryStore {
    fn find_by_id(&self, id: i64) -> RepoResult<Option<Dealer>> {
        Ok(self.state.read().dealers.get(&id).cloned())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Dealer>> {
        let state = self.state.read();
        Ok(state
            .dealers
            .values()
            .find(|dealer| dealer.name == name)
            .cloned())
    }

    fn insert(&self, dealer: NewDealer) -> RepoResult<Dealer> {
        let mut state = self.state.write();
        let id = state.next_dealer_id;
        state.next_dealer_id += 1;
        let dealer = dealer.with_id(id);
        state.dealers.insert(id, dealer.clone());
        Ok(dealer)
    }

    fn update(&self, dealer: Dealer) -> RepoResult<Dealer> {
        let mut state = self.state.write();
        if !state.dealers.contains_key(&dealer.id) {
            return Err(RepositoryError::MissingRow(dealer.id));
        }
        state.dealers.insert(dealer.id, dealer.clone());
        Ok(dealer)
    }

    fn exists_by_id(&self, id: i64) -> RepoResult<bool> {
        Ok(self.state.read().dealers.contains_key(&id))
    }

    fn delete_by_id(&self, id: i64) -> RepoResult<()> {
        let mut state = self.state.write();
        if state.dealers.remove(&id).is_some() {
            state.cars.retain(|_, car| car.dealer_id != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_car(vin: &str, dealer_id: i64) -> NewCar {
        NewCar {
            vin: vin.to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            dealer_id,
        }
    }

    fn store_with_dealer() -> (InMemoryStore, Dealer) {
        let store = InMemoryStore::new();
        let dealer = DealerRepository::insert(
            &store,
            NewDealer {
                name: "Auto House".to_string(),
                address: "Main St 1".to_string(),
            },
        )
        .unwrap();
        (store, dealer)
    }

    #[test]
    fn test_ids_start_at_one() {
        let (store, dealer) = store_with_dealer();
        assert_eq!(dealer.id, 1);

        let car = CarRepository::insert(&store, new_car("V1", dealer.id)).unwrap();
        assert_eq!(car.id, 1);
        let car = CarRepository::insert(&store, new_car("V2", dealer.id)).unwrap();
        assert_eq!(car.id, 2);
    }

    #[test]
    fn test_insert_rejects_duplicate_vin() {
        let (store, dealer) = store_with_dealer();
        CarRepository::insert(&store, new_car("V1", dealer.id)).unwrap();

        let err = CarRepository::insert(&store, new_car("V1", dealer.id)).unwrap_err();
        assert_eq!(err, RepositoryError::UniqueViolation("V1".to_string()));
    }

    #[test]
    fn test_insert_rejects_missing_dealer() {
        let store = InMemoryStore::new();
        let err = CarRepository::insert(&store, new_car("V1", 42)).unwrap_err();
        assert_eq!(err, RepositoryError::MissingDealer(42));
    }

    #[test]
    fn test_insert_all_returns_persisted_subset() {
        let (store, dealer) = store_with_dealer();
        CarRepository::insert(&store, new_car("V1", dealer.id)).unwrap();

        let saved = store
            .insert_all(vec![
                new_car("V1", dealer.id),
                new_car("V2", dealer.id),
                new_car("V3", 99),
            ])
            .unwrap();

        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].vin, "V2");
        assert_eq!(store.find_all().unwrap().len(), 2);
    }

    #[test]
    fn test_find_by_dealer_and_year() {
        let (store, dealer) = store_with_dealer();
        let mut old = new_car("V1", dealer.id);
        old.year = 2010;
        CarRepository::insert(&store, old).unwrap();
        CarRepository::insert(&store, new_car("V2", dealer.id)).unwrap();

        let cars = store.find_by_dealer_and_year(dealer.id, 2020).unwrap();
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].vin, "V2");
        assert!(store.find_by_dealer_and_year(dealer.id, 1999).unwrap().is_empty());
    }

    #[test]
    fn test_update_checks_vin_against_other_rows() {
        let (store, dealer) = store_with_dealer();
        let first = CarRepository::insert(&store, new_car("V1", dealer.id)).unwrap();
        CarRepository::insert(&store, new_car("V2", dealer.id)).unwrap();

        // Keeping its own VIN is fine
        let mut same = first.clone();
        same.make = "Honda".to_string();
        assert!(CarRepository::update(&store, same).is_ok());

        let mut clash = first;
        clash.vin = "V2".to_string();
        assert!(matches!(
            CarRepository::update(&store, clash),
            Err(RepositoryError::UniqueViolation(_))
        ));
    }

    #[test]
    fn test_dealer_delete_cascades() {
        let (store, dealer) = store_with_dealer();
        let other = DealerRepository::insert(
            &store,
            NewDealer {
                name: "Other".to_string(),
                address: String::new(),
            },
        )
        .unwrap();
        CarRepository::insert(&store, new_car("V1", dealer.id)).unwrap();
        CarRepository::insert(&store, new_car("V2", other.id)).unwrap();

        DealerRepository::delete_by_id(&store, dealer.id).unwrap();

        assert!(!DealerRepository::exists_by_id(&store, dealer.id).unwrap());
        let remaining = store.find_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].vin, "V2");
    }

    #[test]
    fn test_find_by_name() {
        let (store, dealer) = store_with_dealer();
        assert_eq!(store.find_by_name("Auto House").unwrap(), Some(dealer));
        assert_eq!(store.find_by_name("Nobody").unwrap(), None);
    }
}
