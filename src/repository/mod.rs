//! Repository Module
//!
//! Persistence seam consumed by the services. The services treat these
//! traits as black boxes; `insert_all` in particular may persist only a
//! subset of its input and reports exactly which rows made it.

mod memory;

use thiserror::Error;

use crate::models::{Car, Dealer, NewCar, NewDealer};

pub use memory::InMemoryStore;

// == Repository Error ==
/// Failure raised by a repository implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Write would duplicate a VIN
    #[error("unique constraint violated: VIN {0} already stored")]
    UniqueViolation(String),

    /// Write references a dealer that does not exist
    #[error("foreign key violated: dealer {0} does not exist")]
    MissingDealer(i64),

    /// Update targets a row that does not exist
    #[error("row {0} does not exist")]
    MissingRow(i64),

    /// Backend failure (connection, poisoned state, ...)
    #[error("storage backend failure: {0}")]
    Backend(String),
}

pub type RepoResult<T> = std::result::Result<T, RepositoryError>;

// == Car Repository ==
/// Storage operations for cars.
pub trait CarRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> RepoResult<Option<Car>>;

    fn find_by_vin(&self, vin: &str) -> RepoResult<Option<Car>>;

    /// First car (lowest id) with the given make
    fn find_by_make(&self, make: &str) -> RepoResult<Option<Car>>;

    fn find_all(&self) -> RepoResult<Vec<Car>>;

    fn find_by_dealer(&self, dealer_id: i64) -> RepoResult<Vec<Car>>;

    fn find_by_dealer_and_year(&self, dealer_id: i64, year: i32) -> RepoResult<Vec<Car>>;

    /// Persists a new car and returns it with its generated id.
    fn insert(&self, car: NewCar) -> RepoResult<Car>;

    /// Persists a batch. Returns only the cars that were actually stored,
    /// which may be fewer than were passed in.
    fn insert_all(&self, cars: Vec<NewCar>) -> RepoResult<Vec<Car>>;

    /// Overwrites an existing car row.
    fn update(&self, car: Car) -> RepoResult<Car>;

    fn exists_by_id(&self, id: i64) -> RepoResult<bool>;

    fn delete_by_id(&self, id: i64) -> RepoResult<()>;
}

// == Dealer Repository ==
/// Storage operations for dealers.
pub trait DealerRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> RepoResult<Option<Dealer>>;

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Dealer>>;

    fn insert(&self, dealer: NewDealer) -> RepoResult<Dealer>;

    fn update(&self, dealer: Dealer) -> RepoResult<Dealer>;

    fn exists_by_id(&self, id: i64) -> RepoResult<bool>;

    /// Deletes the dealer together with every car it owns.
    fn delete_by_id(&self, id: i64) -> RepoResult<()>;
}
