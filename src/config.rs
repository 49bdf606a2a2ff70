//! Configuration system using Figment.
//!
//! Strongly-typed settings for the recording engine, loaded from:
//! 1. a TOML file (`sensor-rec.toml` by default)
//! 2. environment variables prefixed with `SENSOR_REC_`
//!
//! Environment variables override file values; sections are separated with a
//! double underscore, e.g. `SENSOR_REC_RECORDING__SAMPLE_RATE_HZ=50`.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "sensor-rec.toml";

/// Top-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application-level settings.
    #[serde(default)]
    pub application: ApplicationSettings,
    /// Recording engine settings.
    #[serde(default)]
    pub recording: RecordingSettings,
}

/// Application-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSettings {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Recording engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSettings {
    /// Ticker rate in Hz. 20 Hz gives a 50 ms tick period.
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: u32,
    /// Appended rows between forced flushes of the session log.
    #[serde(default = "default_flush_threshold")]
    pub flush_threshold: usize,
    /// Directory holding one CSV file per session.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sample_rate_hz() -> u32 {
    20
}

fn default_flush_threshold() -> usize {
    200
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("sessions")
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            sample_rate_hz: default_sample_rate_hz(),
            flush_threshold: default_flush_threshold(),
            output_dir: default_output_dir(),
        }
    }
}

impl RecordingSettings {
    /// Tick period derived from the configured sample rate.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.sample_rate_hz.max(1)))
    }
}

impl Settings {
    /// Load settings from the default file path and environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load settings from a specific file path, merged with `SENSOR_REC_*`
    /// environment variables.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("SENSOR_REC_").split("__"))
            .extract()
    }

    /// Validate settings after loading.
    pub fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.application.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.application.log_level,
                valid_levels.join(", ")
            ));
        }

        if self.recording.sample_rate_hz == 0 {
            return Err("sample_rate_hz must be greater than zero".to_string());
        }

        if self.recording.flush_threshold == 0 {
            return Err("flush_threshold must be greater than zero".to_string());
        }

        Ok(())
    }
}
