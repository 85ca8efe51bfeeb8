//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Slotbook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DB_MAX_CONNECTIONS`: Size of the connection pool (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `BUSINESS_START_HOUR` / `BUSINESS_END_HOUR`: Opening hours (default: 9 / 18)
//! - `SLOT_DURATION_MINUTES`: Length of a bookable slot (default: 90)
//! - `BUSINESS_TIMEZONE`: IANA zone the opening hours are in (default: "UTC")

use chrono_tz::Tz;
use eyre::{eyre, Result, WrapErr};
use slotbook_core::models::business_hours::{BookingSettings, BusinessHours, SlotDuration};
use std::{env, str::FromStr};
use tracing::{warn, Level};

/// Configuration for the Slotbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub db_max_connections: u32,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Business hours, slot length and time zone used for slot generation
    pub booking: BookingSettings,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - A numeric variable cannot be parsed
    /// - A business hour is outside 0-23 or the slot duration is zero
    /// - BUSINESS_TIMEZONE is not a known IANA time zone
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env_or("API_PORT", 3000)?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;
        let db_max_connections = env_or("DB_MAX_CONNECTIONS", 5)?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_default());

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| parse_origins(&origins));

        // Performance settings
        let request_timeout = env_or("API_REQUEST_TIMEOUT_SECONDS", 30)?;

        // Booking settings
        let booking = booking_settings(
            env_or("BUSINESS_START_HOUR", 9)?,
            env_or("BUSINESS_END_HOUR", 18)?,
            env_or("SLOT_DURATION_MINUTES", 90)?,
            &env::var("BUSINESS_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
        )?;

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            log_level,
            cors_origins,
            request_timeout,
            booking,
        })
    }

    /// Returns the server address as a string, e.g. "127.0.0.1:8080"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builds and checks the booking settings from raw configuration values.
///
/// Closing at or before opening is allowed but logged, since it leaves every
/// day without slots.
pub fn booking_settings(
    start_hour: u32,
    end_hour: u32,
    slot_minutes: u32,
    timezone: &str,
) -> Result<BookingSettings> {
    let business_hours = BusinessHours::new(start_hour, end_hour)?;
    let slot_duration = SlotDuration::from_minutes(slot_minutes)?;
    let timezone = timezone
        .parse::<Tz>()
        .map_err(|e| eyre!("Invalid BUSINESS_TIMEZONE {:?}: {}", timezone, e))?;

    if business_hours.is_degenerate() {
        warn!(
            "Business hours {}:00-{}:00 are empty; no slots will be offered",
            start_hour, end_hour
        );
    }

    Ok(BookingSettings {
        business_hours,
        slot_duration,
        timezone,
    })
}

pub fn parse_log_level(value: &str) -> Level {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {} value: {:?}", key, value)),
        Err(_) => Ok(default),
    }
}
