// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rollup artifacts: per-day, per-month, lifetime summary and per-city.
//!
//! All of these are recomputed from the full activity set on every run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::DailyActivity;

/// One active calendar day (`daily.json` element).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Daily {
    pub date: NaiveDate,
    pub distance_m: f64,
    pub duration_s: f64,
    /// That day's activities in start-time order
    pub activities: Vec<DailyActivity>,
}

/// One calendar month (`monthly.json` element).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Monthly {
    pub year: i32,
    pub month: u32,
    pub distance_m: f64,
    pub duration_s: f64,
    /// Distinct active days in the month (not the activity count)
    pub days: u32,
}

/// Lifetime totals (`summary.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Summary {
    pub total_days: u32,
    pub total_distance_m: f64,
    pub avg_distance_per_day_m: f64,
}

impl Summary {
    /// Build the summary from the daily rollup.
    ///
    /// The average divides by distinct active days, not by activity count.
    pub fn from_daily(daily: &[Daily]) -> Self {
        let total_days = daily.len() as u32;
        let total_distance_m: f64 = daily.iter().map(|d| d.distance_m).sum();
        let avg_distance_per_day_m = if total_days == 0 {
            0.0
        } else {
            total_distance_m / f64::from(total_days)
        };

        Self {
            total_days,
            total_distance_m,
            avg_distance_per_day_m,
        }
    }
}

/// Totals for one resolved place (`city-stats.json` element).
///
/// Keyed by `(city, admin1)`: the same city name in two regions is two entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CityStat {
    pub city: String,
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub runs: u32,
    pub distance_m: f64,
    /// Mean of the defined per-activity paces; `None` if there are none
    pub avg_pace_sec_per_km: Option<f64>,
}
