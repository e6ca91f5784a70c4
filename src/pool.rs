use chrono::{DateTime, Datelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use utoipa::ToSchema;

pub const DEFAULT_CAPACITY: i32 = 120;

const LOCATION_NAME: &str = "Piscina Municipal da Sobreposta";
const ADDRESS: &str = "R. da Piscina 22, 4715-553 Sobreposta";
const PHONE: &str = "253 636 948";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoolStatus {
    pub current_count: i32,
    pub max_capacity: i32,
    pub is_open: bool,
    pub last_updated: DateTime<Utc>,
    pub location_name: String,
    pub address: String,
    pub phone: String,
    pub today_opening_hours: String,
}

pub fn opening_hours(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "10:00–19:00",
        Weekday::Tue => "10:00–19:00",
        Weekday::Wed => "10:00–19:00",
        Weekday::Thu => "10:00–19:00",
        Weekday::Fri => "10:00–19:00",
        Weekday::Sat => "09:00–19:00",
        Weekday::Sun => "09:00–19:00",
    }
}

/// Tracks live occupancy of the pool. All operations run under one lock and
/// hand back a complete snapshot; out-of-range inputs are clamped, never
/// rejected.
pub struct PoolService {
    status: Mutex<PoolStatus>,
    timezone: Tz,
}

impl PoolService {
    pub fn new(timezone: Tz) -> Self {
        let status = PoolStatus {
            current_count: 0,
            max_capacity: DEFAULT_CAPACITY,
            is_open: true,
            last_updated: Utc::now(),
            location_name: LOCATION_NAME.to_string(),
            address: ADDRESS.to_string(),
            phone: PHONE.to_string(),
            today_opening_hours: opening_hours(Utc::now().with_timezone(&timezone).weekday())
                .to_string(),
        };

        Self {
            status: Mutex::new(status),
            timezone,
        }
    }

    fn today_opening_hours(&self) -> String {
        let today = Utc::now().with_timezone(&self.timezone).weekday();
        opening_hours(today).to_string()
    }

    // Refreshes the derived fields after a mutation.
    fn touch(&self, status: &mut PoolStatus) {
        status.last_updated = Utc::now();
        status.today_opening_hours = self.today_opening_hours();
    }

    pub async fn status(&self) -> PoolStatus {
        let mut status = self.status.lock().await;
        status.today_opening_hours = self.today_opening_hours();
        status.clone()
    }

    pub async fn enter(&self) -> PoolStatus {
        let mut status = self.status.lock().await;

        // No entries while the pool is closed.
        if !status.is_open {
            self.touch(&mut status);
            return status.clone();
        }

        if status.current_count < status.max_capacity {
            status.current_count += 1;
        }

        self.touch(&mut status);
        status.clone()
    }

    pub async fn exit(&self) -> PoolStatus {
        let mut status = self.status.lock().await;

        if status.current_count > 0 {
            status.current_count -= 1;
        }

        self.touch(&mut status);
        status.clone()
    }

    pub async fn set_count(&self, value: i32) -> PoolStatus {
        let mut status = self.status.lock().await;

        status.current_count = value.clamp(0, status.max_capacity);

        self.touch(&mut status);
        status.clone()
    }

    pub async fn set_open_status(&self, is_open: bool) -> PoolStatus {
        let mut status = self.status.lock().await;

        status.is_open = is_open;

        // Closing always empties the pool.
        if !is_open {
            status.current_count = 0;
        }

        self.touch(&mut status);
        status.clone()
    }

    pub async fn set_capacity(&self, value: i32) -> PoolStatus {
        let mut status = self.status.lock().await;

        status.max_capacity = value.max(1);

        if status.current_count > status.max_capacity {
            status.current_count = status.max_capacity;
        }

        self.touch(&mut status);
        status.clone()
    }
}
