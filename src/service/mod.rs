//! Service Module
//!
//! Business rules over the repositories: duplicate checks, cache-first
//! reads, invalidation after writes and the bulk import contract.

mod car_service;
mod dealer_service;

#[cfg(test)]
mod test_support;

pub use car_service::{BulkAddReport, CarService};
pub use dealer_service::DealerService;
