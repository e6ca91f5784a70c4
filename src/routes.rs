use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::Config,
    middleware::require_admin_key,
    pool::{PoolService, PoolStatus},
    weather::{types::WeatherInfo, WeatherService},
};

pub const WEATHER_UNAVAILABLE: &str = "Failed to fetch weather data.";

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: Arc<PoolService>,
    pub weather: Arc<WeatherService>,
}

// Request/Response types
#[derive(Debug, Deserialize, IntoParams)]
pub struct CountQuery {
    pub value: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CapacityQuery {
    pub value: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OpenStatusQuery {
    pub is_open: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

// Route handlers
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api/pool/status",
    tag = "pool",
    responses((status = 200, body = PoolStatus))
)]
pub async fn get_status(State(state): State<AppState>) -> Json<PoolStatus> {
    Json(state.pool.status().await)
}

#[utoipa::path(
    post,
    path = "/api/pool/enter",
    tag = "pool",
    responses(
        (status = 200, body = PoolStatus),
        (status = 401, description = "Missing or invalid admin key")
    )
)]
pub async fn enter(State(state): State<AppState>) -> Json<PoolStatus> {
    Json(state.pool.enter().await)
}

#[utoipa::path(
    post,
    path = "/api/pool/exit",
    tag = "pool",
    responses(
        (status = 200, body = PoolStatus),
        (status = 401, description = "Missing or invalid admin key")
    )
)]
pub async fn exit(State(state): State<AppState>) -> Json<PoolStatus> {
    Json(state.pool.exit().await)
}

#[utoipa::path(
    put,
    path = "/api/pool/setCount",
    tag = "pool",
    params(CountQuery),
    responses(
        (status = 200, body = PoolStatus),
        (status = 401, description = "Missing or invalid admin key")
    )
)]
pub async fn set_count(
    State(state): State<AppState>,
    Query(params): Query<CountQuery>,
) -> Json<PoolStatus> {
    Json(state.pool.set_count(params.value).await)
}

#[utoipa::path(
    put,
    path = "/api/pool/setCapacity",
    tag = "pool",
    params(CapacityQuery),
    responses(
        (status = 200, body = PoolStatus),
        (status = 401, description = "Missing or invalid admin key")
    )
)]
pub async fn set_capacity(
    State(state): State<AppState>,
    Query(params): Query<CapacityQuery>,
) -> Json<PoolStatus> {
    Json(state.pool.set_capacity(params.value).await)
}

#[utoipa::path(
    put,
    path = "/api/pool/setOpenStatus",
    tag = "pool",
    params(OpenStatusQuery),
    responses(
        (status = 200, body = PoolStatus),
        (status = 401, description = "Missing or invalid admin key")
    )
)]
pub async fn set_open_status(
    State(state): State<AppState>,
    Query(params): Query<OpenStatusQuery>,
) -> Json<PoolStatus> {
    Json(state.pool.set_open_status(params.is_open).await)
}

#[utoipa::path(
    get,
    path = "/api/weather/current",
    tag = "weather",
    responses(
        (status = 200, body = WeatherInfo),
        (status = 503, description = "No weather data available")
    )
)]
pub async fn current_weather(
    State(state): State<AppState>,
) -> Result<Json<WeatherInfo>, (StatusCode, &'static str)> {
    match state.weather.get_current_weather().await {
        Some(info) => Ok(Json(info)),
        None => Err((StatusCode::SERVICE_UNAVAILABLE, WEATHER_UNAVAILABLE)),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        get_status,
        enter,
        exit,
        set_count,
        set_capacity,
        set_open_status,
        current_weather
    ),
    components(schemas(HealthResponse, PoolStatus, WeatherInfo)),
    tags(
        (name = "pool", description = "Pool occupancy tracking"),
        (name = "weather", description = "Cached local weather")
    )
)]
pub struct ApiDoc;

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/pool/status", get(get_status))
        .route("/api/pool/enter", post(enter))
        .route("/api/pool/exit", post(exit))
        .route("/api/pool/setCount", put(set_count))
        .route("/api/pool/setCapacity", put(set_capacity))
        .route("/api/pool/setOpenStatus", put(set_open_status))
        .route("/api/weather/current", get(current_weather))
        .layer(from_fn_with_state(state.clone(), require_admin_key))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
