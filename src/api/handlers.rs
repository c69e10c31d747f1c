//! API Handlers
//!
//! HTTP request handlers for the car and dealer endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::{CacheKey, SharedCache};
use crate::error::{AppError, Result};
use crate::models::{
    validate_bulk, BulkAddResponse, CacheStatsResponse, CarDto, CarRequest, DealerDto,
    DealerIdQuery, DealerRequest, DealerYearQuery, HealthResponse, IdQuery, MakeQuery,
    MessageResponse, NameQuery, TransferQuery, VinQuery,
};
use crate::repository::InMemoryStore;
use crate::service::{CarService, DealerService};

/// Application state shared across all handlers.
///
/// Built once at startup; every handle inside is cheap to clone and
/// points at the same cache and repositories.
#[derive(Clone)]
pub struct AppState {
    pub cars: CarService,
    pub dealers: DealerService,
    /// The car lookup cache, shared with both services
    pub cache: SharedCache<CacheKey, CarDto>,
    cache_capacity: usize,
}

impl AppState {
    /// Wires both services to one store and one lookup cache.
    pub fn new(store: Arc<InMemoryStore>, cache_capacity: usize) -> Self {
        let cache = SharedCache::new(cache_capacity);
        Self {
            cars: CarService::new(store.clone(), store.clone(), cache.clone()),
            dealers: DealerService::new(store.clone(), store, cache.clone()),
            cache,
            cache_capacity: cache_capacity.max(1),
        }
    }

    /// Creates a new AppState from configuration with an empty store.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), config.car_cache_capacity)
    }
}

fn check(validation: Option<String>) -> Result<()> {
    match validation {
        Some(msg) => Err(AppError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

// == Car Endpoints ==

/// Handler for POST /cars?dealerId=
pub async fn add_car_handler(
    State(state): State<AppState>,
    Query(query): Query<DealerIdQuery>,
    Json(req): Json<CarRequest>,
) -> Result<(StatusCode, Json<CarDto>)> {
    check(req.validate())?;
    let car = state.cars.add_car(query.dealer_id, req)?;
    Ok((StatusCode::CREATED, Json(car)))
}

/// Handler for POST /cars/bulk?dealerId=
pub async fn add_cars_bulk_handler(
    State(state): State<AppState>,
    Query(query): Query<DealerIdQuery>,
    Json(req): Json<Vec<CarRequest>>,
) -> Result<(StatusCode, Json<BulkAddResponse>)> {
    check(validate_bulk(&req))?;
    let report = state.cars.add_cars_bulk(query.dealer_id, req)?;
    Ok((
        StatusCode::CREATED,
        Json(BulkAddResponse::new(report.attempted, report.saved)),
    ))
}

/// Handler for GET /cars?id=
pub async fn get_car_handler(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<CarDto>> {
    Ok(Json(state.cars.get_car_by_id(query.id)?))
}

/// Handler for GET /cars/vin?vin=
pub async fn get_car_by_vin_handler(
    State(state): State<AppState>,
    Query(query): Query<VinQuery>,
) -> Result<Json<CarDto>> {
    Ok(Json(state.cars.get_car_by_vin(query.vin.trim())?))
}

/// Handler for GET /cars/make?make=
pub async fn get_car_by_make_handler(
    State(state): State<AppState>,
    Query(query): Query<MakeQuery>,
) -> Result<Json<CarDto>> {
    Ok(Json(state.cars.get_car_by_make(&query.make)?))
}

/// Handler for GET /cars/byYear?dealerId=&year=
pub async fn get_cars_by_year_handler(
    State(state): State<AppState>,
    Query(query): Query<DealerYearQuery>,
) -> Result<Json<Vec<CarDto>>> {
    let cars = state
        .cars
        .get_cars_by_dealer_and_year(query.dealer_id, query.year)?;
    Ok(Json(cars))
}

/// Handler for PUT /cars/id?id=
pub async fn update_car_handler(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(req): Json<CarRequest>,
) -> Result<Json<CarDto>> {
    check(req.validate())?;
    Ok(Json(state.cars.update_car(query.id, req)?))
}

/// Handler for PUT /cars/transfer?carId=&dealerId=
pub async fn transfer_car_handler(
    State(state): State<AppState>,
    Query(query): Query<TransferQuery>,
) -> Result<Json<CarDto>> {
    Ok(Json(state.cars.transfer_car(query.car_id, query.dealer_id)?))
}

/// Handler for DELETE /cars?id=
pub async fn delete_car_handler(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<MessageResponse>> {
    state.cars.delete_car(query.id)?;
    Ok(Json(MessageResponse::new(format!(
        "Car {} deleted",
        query.id
    ))))
}

// == Dealer Endpoints ==

/// Handler for POST /dealers
pub async fn add_dealer_handler(
    State(state): State<AppState>,
    Json(req): Json<DealerRequest>,
) -> Result<(StatusCode, Json<DealerDto>)> {
    check(req.validate())?;
    let dealer = state.dealers.add_dealer(req)?;
    Ok((StatusCode::CREATED, Json(dealer)))
}

/// Handler for GET /dealers?id=
pub async fn get_dealer_handler(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<DealerDto>> {
    Ok(Json(state.dealers.get_dealer_by_id(query.id)?))
}

/// Handler for GET /dealers/name?name=
pub async fn get_dealer_by_name_handler(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<DealerDto>> {
    Ok(Json(state.dealers.get_dealer_by_name(&query.name)?))
}

/// Handler for PUT /dealers/name?name=
pub async fn update_dealer_handler(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
    Json(req): Json<DealerRequest>,
) -> Result<Json<DealerDto>> {
    check(req.validate())?;
    Ok(Json(state.dealers.update_dealer(&query.name, req)?))
}

/// Handler for DELETE /dealers?id=
pub async fn delete_dealer_handler(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<MessageResponse>> {
    state.dealers.delete_dealer(query.id)?;
    Ok(Json(MessageResponse::new(format!(
        "Dealer {} deleted",
        query.id
    ))))
}

// == Operational Endpoints ==

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse::new(
        &state.cache.stats(),
        state.cache_capacity,
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(Arc::new(InMemoryStore::new()), 10)
    }

    fn car(vin: &str) -> CarRequest {
        CarRequest {
            vin: vin.to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
        }
    }

    async fn seed_dealer(state: &AppState) -> i64 {
        let req = DealerRequest {
            name: "Auto House".to_string(),
            address: "Main St 1".to_string(),
        };
        let (_, Json(dealer)) = add_dealer_handler(State(state.clone()), Json(req))
            .await
            .unwrap();
        dealer.id
    }

    #[tokio::test]
    async fn test_add_and_get_car_handler() {
        let state = state();
        let dealer_id = seed_dealer(&state).await;

        let (status, Json(added)) = add_car_handler(
            State(state.clone()),
            Query(DealerIdQuery { dealer_id }),
            Json(car("V1")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(fetched) = get_car_handler(State(state), Query(IdQuery { id: added.id }))
            .await
            .unwrap();
        assert_eq!(fetched, added);
    }

    #[tokio::test]
    async fn test_add_car_invalid_request() {
        let state = state();
        let dealer_id = seed_dealer(&state).await;

        let result = add_car_handler(
            State(state),
            Query(DealerIdQuery { dealer_id }),
            Json(car("")),
        )
        .await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_bulk_handler_rejects_invalid_entry() {
        let state = state();
        let dealer_id = seed_dealer(&state).await;

        let result = add_cars_bulk_handler(
            State(state.clone()),
            Query(DealerIdQuery { dealer_id }),
            Json(vec![car("V1"), car("")]),
        )
        .await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert!(state.cars.get_car_by_vin("V1").is_err());
    }

    #[tokio::test]
    async fn test_cache_stats_handler() {
        let state = state();
        let Json(stats) = cache_stats_handler(State(state)).await;
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.capacity, 10);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
