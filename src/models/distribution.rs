// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Histogram artifacts (`distributions.json`).

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Half-open range `[start, end)` with the activities that fall in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DistributionBin {
    pub start: f64,
    pub end: f64,
    pub count: u32,
    /// Summed distance of the activities in this bin
    pub distance_m: f64,
}

/// Contiguous uniform-width bins covering `[0, max]`. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Distribution {
    pub bin_size: f64,
    pub bins: Vec<DistributionBin>,
}

impl Distribution {
    /// Total number of activities tallied.
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|b| u64::from(b.count)).sum()
    }
}

/// The three standing distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Distributions {
    pub pace_sec_per_km: Distribution,
    pub avg_hr: Distribution,
    pub distance_m: Distribution,
}
