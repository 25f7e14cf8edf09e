// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Non-fatal exclusions collected during a run.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Which aggregate an activity was left out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Aggregate {
    /// Dropped or coerced while normalizing input
    Input,
    Daily,
    Monthly,
    CityStats,
    PaceDistribution,
    HrDistribution,
    DistanceDistribution,
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Aggregate::Input => "input",
            Aggregate::Daily => "daily",
            Aggregate::Monthly => "monthly",
            Aggregate::CityStats => "cityStats",
            Aggregate::PaceDistribution => "distribution:paceSecPerKm",
            Aggregate::HrDistribution => "distribution:avgHr",
            Aggregate::DistanceDistribution => "distribution:distanceM",
        };
        f.write_str(name)
    }
}

/// Why an activity was excluded or altered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExclusionReason {
    /// Start time could not be reduced to a calendar day
    NoDate,
    /// City is empty or the unknown placeholder
    UnresolvedCity,
    /// Metric is missing
    MissingValue,
    /// Metric is zero or negative
    NonPositiveValue,
    /// Sport does not match the configured filter
    SportFiltered,
    /// Non-positive heart rate replaced by null
    InvalidHeartRate,
    /// Only one of lat/lon present; both cleared
    IncompleteCoordinates,
}

/// One activity left out of (or altered for) one aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialDataWarning {
    pub activity_id: String,
    pub aggregate: Aggregate,
    pub reason: ExclusionReason,
}

impl PartialDataWarning {
    pub fn new(activity_id: &str, aggregate: Aggregate, reason: ExclusionReason) -> Self {
        Self {
            activity_id: activity_id.to_string(),
            aggregate,
            reason,
        }
    }
}

/// A component's output together with the activities it had to leave out.
#[derive(Debug, Clone, PartialEq)]
pub struct Tallied<T> {
    pub output: T,
    pub warnings: Vec<PartialDataWarning>,
}

impl<T> Tallied<T> {
    pub fn new(output: T, warnings: Vec<PartialDataWarning>) -> Self {
        Self { output, warnings }
    }
}

/// Bookkeeping for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Records supplied by the decoder
    pub input_records: usize,
    /// Activities that survived normalization
    pub activities: usize,
    pub warnings: Vec<PartialDataWarning>,
}

impl RunReport {
    /// Warning counts per aggregate, in a stable order.
    pub fn counts(&self) -> BTreeMap<Aggregate, usize> {
        let mut counts = BTreeMap::new();
        for warning in &self.warnings {
            *counts.entry(warning.aggregate).or_insert(0) += 1;
        }
        counts
    }

    /// Number of activities excluded from `aggregate`.
    pub fn excluded_from(&self, aggregate: Aggregate) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.aggregate == aggregate)
            .count()
    }

    /// Emit one log line per affected aggregate.
    pub fn log(&self) {
        for (aggregate, count) in self.counts() {
            tracing::warn!(aggregate = %aggregate, count, "Activities excluded from aggregate");
        }
        tracing::info!(
            input_records = self.input_records,
            activities = self.activities,
            warnings = self.warnings.len(),
            "Run complete"
        );
    }
}
