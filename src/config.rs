//! Configuration for the UFC events scraper.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Required values are validated up front, before any network or
//! store work, and missing ones are reported together in one error.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;

use crate::error::ConfigError;

/// Store coordinates: path of the SQLite database file.
pub const ENV_DB_PATH: &str = "UFC_DB_PATH";
/// Listing page URL override.
pub const ENV_LISTING_URL: &str = "UFC_LISTING_URL";
/// Reference timezone name (IANA) used to interpret scraped date text.
pub const ENV_TIMEZONE: &str = "UFC_TIMEZONE";
/// Per-request fetch timeout in seconds.
pub const ENV_FETCH_TIMEOUT_SECS: &str = "UFC_FETCH_TIMEOUT_SECS";
/// Politeness delay before each event-detail fetch, in milliseconds.
pub const ENV_ROSTER_DELAY_MS: &str = "UFC_ROSTER_DELAY_MS";

const DEFAULT_LISTING_URL: &str = "https://www.ufc.com/events";
const DEFAULT_TIMEZONE: &str = "America/New_York";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ROSTER_DELAY_MS: u64 = 1000;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file path.
    pub db_path: PathBuf,
    /// Events listing page URL.
    pub listing_url: String,
    /// Timezone that scraped date text is interpreted in.
    pub reference_timezone: Tz,
    /// Per-request fetch timeout.
    pub fetch_timeout: Duration,
    /// Fixed delay before each roster-page fetch.
    pub roster_delay: Duration,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv().ok()` so a local `.env` file is honored.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Split out from [`AppConfig::load`] so tests can drive it without
    /// mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let db_path = match lookup(ENV_DB_PATH) {
            Some(v) if !v.trim().is_empty() => Some(PathBuf::from(v)),
            _ => {
                missing.push(ENV_DB_PATH.to_string());
                None
            }
        };

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let listing_url =
            lookup(ENV_LISTING_URL).unwrap_or_else(|| DEFAULT_LISTING_URL.to_string());

        let tz_name = lookup(ENV_TIMEZONE).unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let reference_timezone =
            Tz::from_str(&tz_name).map_err(|_| ConfigError::Timezone(tz_name))?;

        let fetch_timeout = Duration::from_secs(parse_or_default(
            &lookup,
            ENV_FETCH_TIMEOUT_SECS,
            DEFAULT_FETCH_TIMEOUT_SECS,
        )?);
        let roster_delay = Duration::from_millis(parse_or_default(
            &lookup,
            ENV_ROSTER_DELAY_MS,
            DEFAULT_ROSTER_DELAY_MS,
        )?);

        Ok(Self {
            db_path: db_path.unwrap_or_default(),
            listing_url,
            reference_timezone,
            fetch_timeout,
            roster_delay,
        })
    }
}

/// Parse an optional setting, falling back to `default` when unset and
/// failing on values that are present but unparseable.
fn parse_or_default<T: FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value,
        }),
    }
}
