use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const CITY_NAME: &str = "Sobreposta, Braga";

// Open-Meteo wire format. Only the current-conditions block is consumed;
// the rest of the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoResponse {
    pub current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherInfo {
    pub city: String,
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub description: String,
    pub icon: String,
}

impl WeatherInfo {
    pub fn from_current(current: &CurrentWeather) -> Self {
        Self {
            city: CITY_NAME.to_string(),
            temperature_c: current.temperature,
            wind_speed_kmh: current.windspeed,
            description: describe_weather_code(current.weathercode).to_string(),
            icon: weather_code_icon(current.weathercode).to_string(),
        }
    }
}

pub fn describe_weather_code(code: u32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mostly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        61 => "Light rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        80 => "Light showers",
        81 => "Moderate showers",
        82 => "Heavy showers",
        _ => "Unknown condition",
    }
}

pub fn weather_code_icon(code: u32) -> &'static str {
    match code {
        0 => "sunny",
        1 | 2 => "cloudy",
        3 => "overcast",
        61 | 63 | 65 => "rain",
        80 | 81 | 82 => "showers",
        _ => "unknown",
    }
}
