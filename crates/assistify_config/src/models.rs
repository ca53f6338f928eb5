// --- File: crates/assistify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Calendar Config ---
// Holds non-secret calendar config. The service-account key itself lives in
// the file referenced by `key_path`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CalendarConfig {
    /// Identifier of the calendar to operate on (e.g. "primary").
    pub calendar_id: Option<String>,
    /// Path to the service-account key JSON used for authentication.
    pub key_path: Option<String>,
    /// First hour of the working day on a 24-hour clock. Defaults to 9.
    pub work_start_hour: Option<u32>,
    /// First hour after the working day on a 24-hour clock. Defaults to 17.
    pub work_end_hour: Option<u32>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_calendar: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub calendar: Option<CalendarConfig>,
}
