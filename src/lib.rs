//! Car Registry - A dealer and car record service
//!
//! Stores dealers and their cars behind a REST API, with a bounded LRU
//! cache in front of the hot car lookups.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use api::AppState;
pub use config::Config;
