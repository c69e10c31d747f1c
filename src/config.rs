//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_CACHE_CAPACITY;

const DEFAULT_SERVER_PORT: u16 = 8080;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of lookups held by the car cache
    pub car_cache_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CAR_CACHE_CAPACITY` - Car lookup cache capacity (default: 10)
    pub fn from_env() -> Self {
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
            car_cache_capacity: parse_var("CAR_CACHE_CAPACITY")
                .filter(|capacity| *capacity > 0)
                .unwrap_or(DEFAULT_CACHE_CAPACITY),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            car_cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}
