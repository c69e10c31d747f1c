//! Repository doubles for service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::models::{Car, NewCar, NewDealer};
use crate::repository::{
    CarRepository, DealerRepository, InMemoryStore, RepoResult, RepositoryError,
};

/// Car repository over an `InMemoryStore` that counts calls and can be
/// told to persist only the first `n` rows of a batch.
pub struct CountingCarRepository {
    pub store: Arc<InMemoryStore>,
    pub find_by_id_calls: AtomicUsize,
    pub insert_all_calls: AtomicUsize,
    pub batch_limit: Option<usize>,
    pub fail_reads: bool,
}

impl CountingCarRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            store,
            find_by_id_calls: AtomicUsize::new(0),
            insert_all_calls: AtomicUsize::new(0),
            batch_limit: None,
            fail_reads: false,
        }
    }

    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn insert_all_calls(&self) -> usize {
        self.insert_all_calls.load(Ordering::SeqCst)
    }
}

impl CarRepository for CountingCarRepository {
    fn find_by_id(&self, id: i64) -> RepoResult<Option<Car>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(RepositoryError::Backend("connection reset".to_string()));
        }
        CarRepository::find_by_id(self.store.as_ref(), id)
    }

    fn find_by_vin(&self, vin: &str) -> RepoResult<Option<Car>> {
        self.store.find_by_vin(vin)
    }

    fn find_by_make(&self, make: &str) -> RepoResult<Option<Car>> {
        self.store.find_by_make(make)
    }

    fn find_all(&self) -> RepoResult<Vec<Car>> {
        self.store.find_all()
    }

    fn find_by_dealer(&self, dealer_id: i64) -> RepoResult<Vec<Car>> {
        self.store.find_by_dealer(dealer_id)
    }

    fn find_by_dealer_and_year(&self, dealer_id: i64, year: i32) -> RepoResult<Vec<Car>> {
        self.store.find_by_dealer_and_year(dealer_id, year)
    }

    fn insert(&self, car: NewCar) -> RepoResult<Car> {
        CarRepository::insert(self.store.as_ref(), car)
    }

    fn insert_all(&self, mut cars: Vec<NewCar>) -> RepoResult<Vec<Car>> {
        self.insert_all_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.batch_limit {
            cars.truncate(limit);
        }
        self.store.insert_all(cars)
    }

    fn update(&self, car: Car) -> RepoResult<Car> {
        CarRepository::update(self.store.as_ref(), car)
    }

    fn exists_by_id(&self, id: i64) -> RepoResult<bool> {
        CarRepository::exists_by_id(self.store.as_ref(), id)
    }

    fn delete_by_id(&self, id: i64) -> RepoResult<()> {
        CarRepository::delete_by_id(self.store.as_ref(), id)
    }
}

/// Inserts a dealer straight into the store and returns its id.
pub fn seed_dealer(store: &InMemoryStore, name: &str) -> i64 {
    DealerRepository::insert(
        store,
        NewDealer {
            name: name.to_string(),
            address: format!("{} street 1", name),
        },
    )
    .map(|dealer| dealer.id)
    .unwrap()
}
