//! API Routes
//!
//! Configures the Axum router with all registry endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_car_handler, add_cars_bulk_handler, add_dealer_handler, cache_stats_handler,
    delete_car_handler, delete_dealer_handler, get_car_by_make_handler, get_car_by_vin_handler,
    get_car_handler, get_cars_by_year_handler, get_dealer_by_name_handler, get_dealer_handler,
    health_handler, transfer_car_handler, update_car_handler, update_dealer_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/cars",
            post(add_car_handler)
                .get(get_car_handler)
                .delete(delete_car_handler),
        )
        .route("/cars/bulk", post(add_cars_bulk_handler))
        .route("/cars/vin", get(get_car_by_vin_handler))
        .route("/cars/make", get(get_car_by_make_handler))
        .route("/cars/byYear", get(get_cars_by_year_handler))
        .route("/cars/id", put(update_car_handler))
        .route("/cars/transfer", put(transfer_car_handler))
        .route(
            "/dealers",
            post(add_dealer_handler)
                .get(get_dealer_handler)
                .delete(delete_dealer_handler),
        )
        .route(
            "/dealers/name",
            get(get_dealer_by_name_handler).put(update_dealer_handler),
        )
        .route("/cache/stats", get(cache_stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
