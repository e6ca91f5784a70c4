use super::types::{CurrentWeather, OpenMeteoResponse};
use crate::config::Config;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

// Fixed forecast point for the facility.
const LATITUDE: f64 = 41.5877;
const LONGITUDE: f64 = -8.3567;

#[derive(Error, Debug)]
pub enum OpenMeteoError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("API error: HTTP {0}")]
    ApiError(reqwest::StatusCode),
    #[error("response has no current_weather block")]
    MissingCurrentWeather,
}

pub struct OpenMeteoClient {
    client: Client,
    config: Config,
}

impl OpenMeteoClient {
    pub fn new(config: Config) -> Self {
        let client = Client::builder()
            .user_agent("PoolTrackerApp/1.0")
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    pub async fn fetch_current(&self) -> Result<CurrentWeather, OpenMeteoError> {
        let url = format!(
            "{}{}",
            self.config.openmeteo_base_url, self.config.openmeteo_forecast_path
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", LATITUDE.to_string().as_str()),
                ("longitude", LONGITUDE.to_string().as_str()),
                ("current_weather", "true"),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpenMeteoError::ApiError(status));
        }

        let payload: OpenMeteoResponse = response.json().await?;

        payload
            .current_weather
            .ok_or(OpenMeteoError::MissingCurrentWeather)
    }
}
