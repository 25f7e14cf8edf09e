// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-day and per-month rollups.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::models::{
    Activity, Aggregate, Daily, DailyActivity, ExclusionReason, Monthly, PartialDataWarning,
    Tallied,
};

/// Daily and monthly rollups, both in ascending calendar order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemporalRollups {
    pub daily: Vec<Daily>,
    pub monthly: Vec<Monthly>,
}

#[derive(Default)]
struct DayAccumulator {
    distance_m: f64,
    duration_s: f64,
    activities: Vec<DailyActivity>,
}

impl DayAccumulator {
    fn add(&mut self, activity: &Activity) {
        self.distance_m += activity.positive_distance_m().unwrap_or(0.0);
        self.duration_s += activity.duration_s.filter(|d| *d >= 0.0).unwrap_or(0.0);
        self.activities.push(DailyActivity::from(activity));
    }

    fn into_daily(self, date: NaiveDate) -> Daily {
        Daily {
            date,
            distance_m: self.distance_m,
            duration_s: self.duration_s,
            activities: self.activities,
        }
    }
}

/// Group activities by local calendar day.
///
/// `activities` must already be in start-time order; each day keeps that
/// order. Activities without a date are reported, once for the daily and
/// once for the monthly rollup they cannot join.
pub fn build_daily(activities: &[Activity]) -> Tallied<Vec<Daily>> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    let mut warnings = Vec::new();

    for activity in activities {
        match activity.date {
            Some(date) => days.entry(date).or_default().add(activity),
            None => {
                for aggregate in [Aggregate::Daily, Aggregate::Monthly] {
                    warnings.push(PartialDataWarning::new(
                        &activity.id,
                        aggregate,
                        ExclusionReason::NoDate,
                    ));
                }
            }
        }
    }

    let daily = days
        .into_iter()
        .map(|(date, acc)| acc.into_daily(date))
        .collect();

    Tallied::new(daily, warnings)
}

/// Roll days up into calendar months.
///
/// `days` counts distinct active days, not activities.
pub fn build_monthly(daily: &[Daily]) -> Vec<Monthly> {
    let mut months: BTreeMap<(i32, u32), Monthly> = BTreeMap::new();

    for day in daily {
        let key = (day.date.year(), day.date.month());
        let entry = months.entry(key).or_insert_with(|| Monthly {
            year: key.0,
            month: key.1,
            distance_m: 0.0,
            duration_s: 0.0,
            days: 0,
        });
        entry.distance_m += day.distance_m;
        entry.duration_s += day.duration_s;
        entry.days += 1;
    }

    months.into_values().collect()
}

/// Build both rollups in one call.
pub fn aggregate(activities: &[Activity]) -> Tallied<TemporalRollups> {
    let daily = build_daily(activities);
    let monthly = build_monthly(&daily.output);

    tracing::debug!(
        days = daily.output.len(),
        months = monthly.len(),
        undated = daily.warnings.len() / 2,
        "Built temporal rollups"
    );

    Tallied::new(
        TemporalRollups {
            daily: daily.output,
            monthly,
        },
        daily.warnings,
    )
}
