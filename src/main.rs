use chrono_tz::Tz;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod middleware;
mod pool;
mod routes;
mod weather;

use config::Config;
use pool::PoolService;
use routes::{create_router, AppState};
use weather::WeatherService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pooltracker_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let timezone: Tz = config
        .app_timezone
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid APP_TIMEZONE {}: {}", config.app_timezone, e))?;

    // Initialize the occupancy tracker
    let pool = Arc::new(PoolService::new(timezone));

    // Initialize the weather service
    let weather = Arc::new(WeatherService::new(config.clone()));

    let config = Arc::new(config);

    // Create application state
    let state = AppState {
        config,
        pool,
        weather,
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("Server starting on http://0.0.0.0:8080");

    axum::serve(listener, app).await?;

    Ok(())
}
