//! Entities and request/response models for the registry
//!
//! Entities are what the repository stores; the DTOs serialize and
//! deserialize HTTP bodies.

pub mod entities;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use entities::{Car, Dealer, NewCar, NewDealer};
pub use requests::{
    validate_bulk, CarRequest, DealerIdQuery, DealerRequest, DealerYearQuery, IdQuery, MakeQuery,
    NameQuery, TransferQuery, VinQuery,
};
pub use responses::{
    BulkAddResponse, CacheStatsResponse, CarDto, DealerDto, HealthResponse, MessageResponse,
};
