// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity records: the raw shape supplied by the decoder and the
//! canonical shape every aggregate reads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Placeholder city for activities that could not be resolved to a place.
pub const UNKNOWN_CITY: &str = "unknown";

/// Placeholder sport when the device did not record one.
pub const UNKNOWN_SPORT: &str = "unknown";

/// Activity as supplied by the upstream decoder. Every field may be absent.
///
/// Unknown keys (e.g. a precomputed `paceSecPerKm`) are ignored; derived
/// fields are always recomputed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawActivity {
    pub id: Option<String>,
    pub source_file: Option<String>,
    pub sport: Option<String>,
    /// Local start time, preferably RFC 3339 with offset
    pub start_time: Option<String>,
    pub start_time_utc: Option<String>,
    pub distance_m: Option<f64>,
    pub duration_s: Option<f64>,
    pub avg_hr: Option<f64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub admin1: Option<String>,
}

/// Canonical, validated activity.
///
/// Serialized as an element of `activities.json`. Optional values are
/// always written (as `null`) so "no data" stays distinct from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    pub id: String,
    pub source_file: Option<String>,
    /// Lowercased sport name ("running", ...)
    pub sport: String,
    /// Start time as recorded (local wall clock)
    pub start_time: String,
    /// Start time in UTC, RFC 3339 with `Z`
    pub start_time_utc: Option<String>,
    /// Local calendar day of the start; `None` if unparsable
    pub date: Option<NaiveDate>,
    /// Distance in meters
    pub distance_m: Option<f64>,
    /// Timer duration in seconds
    pub duration_s: Option<f64>,
    /// Seconds per kilometer; defined only for positive distance and duration
    pub pace_sec_per_km: Option<f64>,
    /// Average heart rate in bpm
    pub avg_hr: Option<f64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: String,
    pub country: Option<String>,
    pub admin1: Option<String>,
}

impl Activity {
    /// Whether the activity was matched to a named place.
    pub fn has_resolved_city(&self) -> bool {
        !self.city.is_empty() && !self.city.eq_ignore_ascii_case(UNKNOWN_CITY)
    }

    /// Distance, only when strictly positive.
    pub fn positive_distance_m(&self) -> Option<f64> {
        self.distance_m.filter(|d| *d > 0.0)
    }
}

/// Compact activity entry inside a `daily.json` bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyActivity {
    pub id: String,
    pub start_time: String,
    pub start_time_utc: Option<String>,
    pub distance_m: Option<f64>,
    pub duration_s: Option<f64>,
    pub pace_sec_per_km: Option<f64>,
    pub avg_hr: Option<f64>,
}

impl From<&Activity> for DailyActivity {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id.clone(),
            start_time: activity.start_time.clone(),
            start_time_utc: activity.start_time_utc.clone(),
            distance_m: activity.distance_m,
            duration_s: activity.duration_s,
            pace_sec_per_km: activity.pace_sec_per_km,
            avg_hr: activity.avg_hr,
        }
    }
}
