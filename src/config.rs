//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first when present.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::db::keys;
use crate::models::Coords;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Storage ---
    /// Directory for file-backed storage
    pub storage_dir: PathBuf,
    /// The single key holding all workouts
    pub storage_key: String,

    // --- Map view ---
    /// Zoom level of the initial view
    pub map_zoom: f64,
    /// Zoom level when panning to a selected workout
    pub selected_zoom: f64,
    /// Duration of the animated pan to a selected workout
    pub pan_duration: Duration,
    /// Cosmetic delay before the form's visual state is restored after hiding
    pub form_settle_delay: Duration,

    // --- Location ---
    /// Position reported by the configured location service
    pub home_position: Option<Coords>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".pinned-workouts"),
            storage_key: keys::WORKOUTS.to_string(),
            map_zoom: 13.0,
            selected_zoom: 13.0,
            pan_duration: Duration::from_millis(1000),
            form_settle_delay: Duration::from_millis(1000),
            home_position: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            storage_dir: env::var("TRACKER_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            storage_key: env::var("TRACKER_STORAGE_KEY")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.storage_key),
            map_zoom: env_parse("TRACKER_MAP_ZOOM").unwrap_or(defaults.map_zoom),
            selected_zoom: env_parse("TRACKER_SELECTED_ZOOM").unwrap_or(defaults.selected_zoom),
            pan_duration: env_parse("TRACKER_PAN_DURATION_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.pan_duration),
            form_settle_delay: env_parse("TRACKER_FORM_SETTLE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.form_settle_delay),
            home_position: home_position_from_env()?,
        })
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn home_position_from_env() -> Result<Option<Coords>, ConfigError> {
    let lat = env::var("TRACKER_HOME_LAT").ok();
    let lng = env::var("TRACKER_HOME_LNG").ok();

    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => {
            let lat: f64 = lat
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("TRACKER_HOME_LAT", lat.clone()))?;
            let lng: f64 = lng
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("TRACKER_HOME_LNG", lng.clone()))?;
            Ok(Some(Coords::new(lat, lng)))
        }
        (Some(_), None) => Err(ConfigError::Missing("TRACKER_HOME_LNG")),
        (None, Some(_)) => Err(ConfigError::Missing("TRACKER_HOME_LAT")),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
