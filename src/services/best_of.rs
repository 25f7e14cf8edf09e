// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal-best selection.
//!
//! Every record is one scan over the activity list with a qualifying
//! predicate and a strict "better than" comparison. On ties the activity
//! seen first keeps the record.

use crate::models::{Activity, BestRecord, PersonalBests};

/// 5K best-effort threshold in meters.
pub const BEST_5K_M: f64 = 5000.0;
/// 10K best-effort threshold in meters.
pub const BEST_10K_M: f64 = 10000.0;

/// A qualifying condition plus a strict ordering among qualifiers.
pub trait RecordCriterion {
    /// Whether the activity can hold this record at all.
    fn qualifies(&self, activity: &Activity) -> bool;

    /// Whether `candidate` strictly beats `current`.
    fn better_than(&self, candidate: &Activity, current: &Activity) -> bool;
}

/// Return the best qualifying activity, or `None` if nothing qualifies.
pub fn select_best<'a, C>(activities: &'a [Activity], criterion: &C) -> Option<&'a Activity>
where
    C: RecordCriterion + ?Sized,
{
    select_best_by(
        activities,
        |a| criterion.qualifies(a),
        |candidate, current| criterion.better_than(candidate, current),
    )
}

/// Closure form of [`select_best`].
pub fn select_best_by<'a, Q, B>(
    activities: &'a [Activity],
    qualifies: Q,
    better_than: B,
) -> Option<&'a Activity>
where
    Q: Fn(&Activity) -> bool,
    B: Fn(&Activity, &Activity) -> bool,
{
    activities
        .iter()
        .filter(|&a| qualifies(a))
        .fold(None, |best, candidate| match best {
            Some(current) if !better_than(candidate, current) => Some(current),
            _ => Some(candidate),
        })
}

/// Fastest pace among activities at least `min_distance_m` long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FastestOver {
    pub min_distance_m: f64,
}

impl RecordCriterion for FastestOver {
    fn qualifies(&self, activity: &Activity) -> bool {
        activity.pace_sec_per_km.is_some()
            && activity
                .distance_m
                .is_some_and(|d| d >= self.min_distance_m)
    }

    fn better_than(&self, candidate: &Activity, current: &Activity) -> bool {
        match (candidate.pace_sec_per_km, current.pace_sec_per_km) {
            (Some(c), Some(b)) => c < b,
            _ => false,
        }
    }
}

/// Longest single activity by distance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Longest;

impl RecordCriterion for Longest {
    fn qualifies(&self, activity: &Activity) -> bool {
        activity.positive_distance_m().is_some()
    }

    fn better_than(&self, candidate: &Activity, current: &Activity) -> bool {
        match (candidate.distance_m, current.distance_m) {
            (Some(c), Some(b)) => c > b,
            _ => false,
        }
    }
}

/// Find the three standing records.
pub fn find_personal_bests(activities: &[Activity]) -> PersonalBests {
    let effort = |min_distance_m: f64| {
        select_best(activities, &FastestOver { min_distance_m })
            .map(|a| BestRecord::effort(a, min_distance_m / 1000.0))
    };

    let bests = PersonalBests {
        best_5k: effort(BEST_5K_M),
        best_10k: effort(BEST_10K_M),
        longest: select_best(activities, &Longest).map(BestRecord::plain),
    };

    tracing::debug!(
        best_5k = bests.best_5k.as_ref().map(|r| r.activity_id.as_str()),
        best_10k = bests.best_10k.as_ref().map(|r| r.activity_id.as_str()),
        longest = bests.longest.as_ref().map(|r| r.activity_id.as_str()),
        "Selected personal bests"
    );

    bests
}
