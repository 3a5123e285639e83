// --- File: crates/bookdesk_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`, if any
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: None,
        }
    }
}

// --- Admin Console Config ---
// Where the console finds the admin API and how it renders timestamps.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub api_base_url: String, // e.g. http://127.0.0.1:8080
    pub request_timeout_secs: u64,
    pub time_zone: String, // IANA name, used for ru-RU date/time display
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
            time_zone: "Europe/Moscow".to_string(),
        }
    }
}

// --- Schedule Config ---
// Defaults the schedule service applies when generating dates and slots.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    pub day_start_hour: u32, // first default slot, inclusive
    pub day_end_hour: u32,   // last default slot, inclusive
    pub default_interval_minutes: i64,
    pub week_days: u32,
    pub month_days: u32,
    pub seed_requests_path: Option<String>, // JSON array of service requests
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 9,
            day_end_hour: 17,
            default_interval_minutes: 60,
            week_days: 7,
            month_days: 30,
            seed_requests_path: None,
        }
    }
}

impl ScheduleConfig {
    /// Rejects working hours that cannot be rendered as `HH:00` slots.
    pub fn validate(&self) -> Result<(), String> {
        if self.day_start_hour > 23 || self.day_end_hour > 23 {
            return Err(format!(
                "schedule hours must be within 0..=23 (got {}..={})",
                self.day_start_hour, self.day_end_hour
            ));
        }
        if self.day_start_hour > self.day_end_hour {
            return Err(format!(
                "schedule.day_start_hour ({}) is after schedule.day_end_hour ({})",
                self.day_start_hour, self.day_end_hour
            ));
        }
        Ok(())
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            console: ConsoleConfig::default(),
            schedule: ScheduleConfig::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
