pub mod openmeteo;
pub mod types;

use crate::config::Config;
use chrono::{DateTime, Duration, Utc};
use openmeteo::OpenMeteoClient;
use tokio::sync::RwLock;
use types::WeatherInfo;

const CACHE_TTL_MINUTES: i64 = 5;

#[derive(Debug, Clone)]
struct CachedWeather {
    info: WeatherInfo,
    expires_at: DateTime<Utc>,
}

/// Single-slot cache for the latest weather snapshot. Expired entries are
/// kept so a failed refresh can still serve the last known value.
pub struct WeatherCache {
    slot: RwLock<Option<CachedWeather>>,
}

impl WeatherCache {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    pub async fn fresh(&self, now: DateTime<Utc>) -> Option<WeatherInfo> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|cached| now < cached.expires_at)
            .map(|cached| cached.info.clone())
    }

    pub async fn last_known(&self) -> Option<WeatherInfo> {
        let slot = self.slot.read().await;
        slot.as_ref().map(|cached| cached.info.clone())
    }

    pub async fn store(&self, info: WeatherInfo, now: DateTime<Utc>) {
        let mut slot = self.slot.write().await;
        *slot = Some(CachedWeather {
            info,
            expires_at: now + Duration::minutes(CACHE_TTL_MINUTES),
        });
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WeatherService {
    client: OpenMeteoClient,
    cache: WeatherCache,
}

impl WeatherService {
    pub fn new(config: Config) -> Self {
        Self {
            client: OpenMeteoClient::new(config),
            cache: WeatherCache::new(),
        }
    }

    /// Returns the current conditions, preferring the cache. A failed fetch
    /// degrades to the last known snapshot; `None` means no data at all.
    pub async fn get_current_weather(&self) -> Option<WeatherInfo> {
        let now = Utc::now();

        if let Some(cached) = self.cache.fresh(now).await {
            tracing::debug!("Serving cached weather data");
            return Some(cached);
        }

        match self.client.fetch_current().await {
            Ok(current) => {
                let info = WeatherInfo::from_current(&current);
                self.cache.store(info.clone(), now).await;
                Some(info)
            }
            Err(e) => {
                tracing::warn!("Weather fetch failed, falling back to cache: {}", e);
                self.cache.last_known().await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(description: &str) -> WeatherInfo {
        WeatherInfo {
            city: types::CITY_NAME.to_string(),
            temperature_c: 19.5,
            wind_speed_kmh: 11.0,
            description: description.to_string(),
            icon: "cloudy".to_string(),
        }
    }

    // Client pointed at a closed loopback port: every fetch fails fast.
    fn unreachable_config() -> Config {
        Config {
            admin_api_key: "test-key".to_string(),
            openmeteo_base_url: "http://127.0.0.1:1".to_string(),
            openmeteo_forecast_path: "/v1/forecast".to_string(),
            app_timezone: "Europe/Lisbon".to_string(),
        }
    }

    #[tokio::test]
    async fn cache_is_fresh_until_five_minutes() {
        let cache = WeatherCache::new();
        let fetched_at = Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap();
        cache.store(snapshot("Overcast"), fetched_at).await;

        let just_before = fetched_at + Duration::minutes(4) + Duration::seconds(59);
        assert!(cache.fresh(just_before).await.is_some());

        let just_after = fetched_at + Duration::minutes(5) + Duration::seconds(1);
        assert!(cache.fresh(just_after).await.is_none());
    }

    #[tokio::test]
    async fn expired_entry_is_still_last_known() {
        let cache = WeatherCache::new();
        let fetched_at = Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap();
        cache.store(snapshot("Overcast"), fetched_at).await;

        let much_later = fetched_at + Duration::hours(3);

        assert!(cache.fresh(much_later).await.is_none());
        let stale = cache.last_known().await.expect("stale entry retained");
        assert_eq!(stale.description, "Overcast");
    }

    #[tokio::test]
    async fn store_replaces_the_previous_snapshot() {
        let cache = WeatherCache::new();
        let first = Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap();
        cache.store(snapshot("Overcast"), first).await;
        cache.store(snapshot("Clear sky"), first + Duration::minutes(10)).await;

        let current = cache
            .fresh(first + Duration::minutes(11))
            .await
            .expect("replacement is fresh");
        assert_eq!(current.description, "Clear sky");
    }

    #[tokio::test]
    async fn empty_cache_reports_nothing() {
        let cache = WeatherCache::new();
        let now = Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap();

        assert!(cache.fresh(now).await.is_none());
        assert!(cache.last_known().await.is_none());
    }

    #[tokio::test]
    async fn fetch_failure_serves_the_stale_snapshot() {
        let service = WeatherService::new(unreachable_config());

        // Seed a snapshot that expired long ago.
        let fetched_at = Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap();
        service.cache.store(snapshot("Overcast"), fetched_at).await;

        let result = service.get_current_weather().await;

        let info = result.expect("stale snapshot served on fetch failure");
        assert_eq!(info.description, "Overcast");

        // The slot is untouched by the failed refresh.
        let retained = service.cache.last_known().await.expect("still cached");
        assert_eq!(retained.description, "Overcast");
    }

    #[tokio::test]
    async fn fetch_failure_without_cache_is_unavailable() {
        let service = WeatherService::new(unreachable_config());

        assert!(service.get_current_weather().await.is_none());
    }
}
