//! API Module
//!
//! HTTP handlers and routing for the car registry REST API.
//!
//! # Endpoints
//! - `POST /cars?dealerId=` - Add a car to a dealer
//! - `POST /cars/bulk?dealerId=` - Add many cars to a dealer
//! - `GET /cars?id=`, `/cars/vin?vin=`, `/cars/make?make=` - Cached car lookups
//! - `GET /cars/byYear?dealerId=&year=` - Cached list lookup
//! - `PUT /cars/id?id=` - Update a car
//! - `PUT /cars/transfer?carId=&dealerId=` - Move a car to another dealer
//! - `DELETE /cars?id=` - Delete a car
//! - `POST|GET|DELETE /dealers`, `GET|PUT /dealers/name` - Dealer CRUD
//! - `GET /cache/stats` - Lookup cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
