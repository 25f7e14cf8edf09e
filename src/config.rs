// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pipeline configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local runs.

use std::env;
use std::path::PathBuf;

/// Default pace histogram bin width (seconds per km).
pub const DEFAULT_PACE_BIN_SEC: f64 = 15.0;
/// Default heart-rate histogram bin width (bpm).
pub const DEFAULT_HR_BIN_BPM: f64 = 5.0;
/// Default distance histogram bin width (meters).
pub const DEFAULT_DISTANCE_BIN_M: f64 = 1000.0;
/// Sport kept when `RUNBOARD_SPORT` is unset.
pub const DEFAULT_SPORT: &str = "running";
/// `RUNBOARD_SPORT` value that disables the sport filter.
pub const ANY_SPORT: &str = "any";

/// Histogram bin widths, one per distribution metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinWidths {
    pub pace_sec_per_km: f64,
    pub avg_hr: f64,
    pub distance_m: f64,
}

impl Default for BinWidths {
    fn default() -> Self {
        Self {
            pace_sec_per_km: DEFAULT_PACE_BIN_SEC,
            avg_hr: DEFAULT_HR_BIN_BPM,
            distance_m: DEFAULT_DISTANCE_BIN_M,
        }
    }
}

impl BinWidths {
    /// Reject zero, negative and non-finite widths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("paceSecPerKm", self.pace_sec_per_km),
            ("avgHr", self.avg_hr),
            ("distanceM", self.distance_m),
        ] {
            check_bin_width(name, value)?;
        }
        Ok(())
    }
}

/// Validate a single histogram bin width.
pub fn check_bin_width(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidBinWidth { name, value })
    }
}

/// Pipeline configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw activity JSON file, or a directory of `*.json` files
    pub input: PathBuf,
    /// Directory receiving the derived artifacts
    pub out_dir: PathBuf,
    /// Histogram bin widths
    pub bins: BinWidths,
    /// Keep only activities of this sport (case-insensitive); `None` keeps all
    pub sport: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/activities.json"),
            out_dir: PathBuf::from("data/derived"),
            bins: BinWidths::default(),
            sport: Some(DEFAULT_SPORT.to_string()),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and validate it.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        let config = Self {
            input: env::var("RUNBOARD_INPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.input),
            out_dir: env::var("RUNBOARD_OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.out_dir),
            bins: BinWidths {
                pace_sec_per_km: env_f64("RUNBOARD_PACE_BIN_SEC", DEFAULT_PACE_BIN_SEC)?,
                avg_hr: env_f64("RUNBOARD_HR_BIN_BPM", DEFAULT_HR_BIN_BPM)?,
                distance_m: env_f64("RUNBOARD_DISTANCE_BIN_M", DEFAULT_DISTANCE_BIN_M)?,
            },
            sport: match env::var("RUNBOARD_SPORT") {
                Ok(raw) => sport_filter(&raw),
                Err(_) => defaults.sport,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check every numeric parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bins.validate()
    }
}

/// Empty, `any` and `all` turn the filter off.
fn sport_filter(raw: &str) -> Option<String> {
    let sport = raw.trim();
    if sport.is_empty()
        || sport.eq_ignore_ascii_case(ANY_SPORT)
        || sport.eq_ignore_ascii_case("all")
    {
        None
    } else {
        Some(sport.to_string())
    }
}

fn env_f64(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("Bin width for {name} must be a positive number, got {value}")]
    InvalidBinWidth { name: &'static str, value: f64 },

    #[error("Bin width {bin_width} for {name} is too small: covering {max_value} needs more than {limit} bins")]
    TooManyBins {
        name: &'static str,
        bin_width: f64,
        max_value: f64,
        limit: usize,
    },
}
