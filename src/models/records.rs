// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal-best records (`records.json`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Activity;

/// The activity holding a record, with the fields needed to display it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BestRecord {
    pub activity_id: String,
    pub date: Option<NaiveDate>,
    pub start_time: String,
    pub distance_m: Option<f64>,
    pub duration_s: Option<f64>,
    pub pace_sec_per_km: Option<f64>,
    /// Time the record stands for: pace over the target distance for
    /// best efforts, the actual duration for the longest run
    pub projected_time_s: Option<f64>,
}

impl BestRecord {
    /// Record for a best effort over `target_km`.
    pub fn effort(activity: &Activity, target_km: f64) -> Self {
        Self {
            projected_time_s: activity.pace_sec_per_km.map(|pace| pace * target_km),
            ..Self::plain(activity)
        }
    }

    /// Record that reports the activity's own duration.
    pub fn plain(activity: &Activity) -> Self {
        Self {
            activity_id: activity.id.clone(),
            date: activity.date,
            start_time: activity.start_time.clone(),
            distance_m: activity.distance_m,
            duration_s: activity.duration_s,
            pace_sec_per_km: activity.pace_sec_per_km,
            projected_time_s: activity.duration_s,
        }
    }
}

/// The standing personal bests; `None` when nothing qualifies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PersonalBests {
    #[serde(rename = "best5k")]
    pub best_5k: Option<BestRecord>,
    #[serde(rename = "best10k")]
    pub best_10k: Option<BestRecord>,
    pub longest: Option<BestRecord>,
}
