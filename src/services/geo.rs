// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-place statistics.
//!
//! Places are resolved upstream; this only groups by `(city, admin1)`.
//! Groups come out in the order their first activity was seen, so identical
//! input always produces identical output.

use indexmap::IndexMap;

use crate::models::{Activity, Aggregate, CityStat, ExclusionReason, PartialDataWarning, Tallied};

struct CityAccumulator {
    country: Option<String>,
    runs: u32,
    distance_m: f64,
    pace_sum: f64,
    pace_count: u32,
}

impl CityAccumulator {
    fn new(activity: &Activity) -> Self {
        Self {
            country: activity.country.clone(),
            runs: 0,
            distance_m: 0.0,
            pace_sum: 0.0,
            pace_count: 0,
        }
    }

    fn add(&mut self, activity: &Activity) {
        self.runs += 1;
        self.distance_m += activity.positive_distance_m().unwrap_or(0.0);
        if let Some(pace) = activity.pace_sec_per_km {
            self.pace_sum += pace;
            self.pace_count += 1;
        }
    }

    /// Mean of per-activity paces; never zero-filled.
    fn avg_pace(&self) -> Option<f64> {
        (self.pace_count > 0).then(|| self.pace_sum / f64::from(self.pace_count))
    }
}

/// Group activities with a resolved city into [`CityStat`] entries.
pub fn build_city_stats(activities: &[Activity]) -> Tallied<Vec<CityStat>> {
    let mut groups: IndexMap<(String, Option<String>), CityAccumulator> = IndexMap::new();
    let mut warnings = Vec::new();

    for activity in activities {
        if !activity.has_resolved_city() {
            warnings.push(PartialDataWarning::new(
                &activity.id,
                Aggregate::CityStats,
                ExclusionReason::UnresolvedCity,
            ));
            continue;
        }

        groups
            .entry((activity.city.clone(), activity.admin1.clone()))
            .or_insert_with(|| CityAccumulator::new(activity))
            .add(activity);
    }

    let stats: Vec<CityStat> = groups
        .into_iter()
        .map(|((city, admin1), acc)| CityStat {
            avg_pace_sec_per_km: acc.avg_pace(),
            city,
            country: acc.country,
            admin1,
            runs: acc.runs,
            distance_m: acc.distance_m,
        })
        .collect();

    tracing::debug!(
        cities = stats.len(),
        unresolved = warnings.len(),
        "Built city stats"
    );

    Tallied::new(stats, warnings)
}

/// Order for display: most distance first, ties keep their existing order.
pub fn sort_by_distance_desc(stats: &mut [CityStat]) {
    stats.sort_by(|a, b| b.distance_m.total_cmp(&a.distance_m));
}
