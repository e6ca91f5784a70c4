use serde::{Deserialize, Serialize};
use std::env;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub admin_api_key: String,
    pub openmeteo_base_url: String,
    pub openmeteo_forecast_path: String,
    pub app_timezone: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            admin_api_key: env::var("ADMIN_API_KEY")
                .map_err(|_| anyhow::anyhow!("ADMIN_API_KEY not set"))?,
            openmeteo_base_url: env::var("OPENMETEO_BASE_URL")
                .unwrap_or_else(|_| "https://api.open-meteo.com".to_string()),
            openmeteo_forecast_path: env::var("OPENMETEO_FORECAST_PATH")
                .unwrap_or_else(|_| "/v1/forecast".to_string()),
            app_timezone: env::var("APP_TIMEZONE")
                .unwrap_or_else(|_| "Europe/Lisbon".to_string()),
        })
    }
}
