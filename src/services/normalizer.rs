// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record normalizer.
//!
//! Turns decoder output into canonical [`Activity`] records:
//! 1. Validate identity and start time (fatal on failure)
//! 2. Coerce optional fields (heart rate, coordinates, place names)
//! 3. Derive the local calendar date and pace
//! 4. Sort by start time, ties broken by id

use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::models::{
    Activity, Aggregate, ExclusionReason, PartialDataWarning, RawActivity, UNKNOWN_CITY,
    UNKNOWN_SPORT,
};
use crate::time_utils::{format_utc_rfc3339, parse_local, parse_utc};

/// Normalized activities plus the non-fatal notes taken along the way.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub activities: Vec<Activity>,
    pub warnings: Vec<PartialDataWarning>,
}

/// Shortest distance (meters) for which a pace is meaningful. Anything
/// below is GPS jitter on a stationary device.
pub const MIN_PACE_DISTANCE_M: f64 = 1.0;

/// Pace in seconds per km, defined only for a distance of at least
/// [`MIN_PACE_DISTANCE_M`] and a positive duration.
pub fn pace_sec_per_km(distance_m: Option<f64>, duration_s: Option<f64>) -> Option<f64> {
    match (distance_m, duration_s) {
        (Some(distance), Some(duration))
            if distance >= MIN_PACE_DISTANCE_M && duration > 0.0 =>
        {
            Some(duration / (distance / 1000.0)).filter(|pace| pace.is_finite())
        }
        _ => None,
    }
}

/// Convert a coordinate that may still be in device semicircles to degrees.
pub fn normalize_coordinate(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    if value.abs() > 180.0 {
        Some(value * 180.0 / 2f64.powi(31))
    } else {
        Some(value)
    }
}

/// Validate and canonicalize a batch of raw records.
///
/// When `sport` is given, records of any other sport are dropped before
/// duplicate detection. Any [`ValidationError`] aborts the whole batch.
pub fn normalize(
    raw: Vec<RawActivity>,
    sport: Option<&str>,
) -> Result<Normalized, ValidationError> {
    let input_len = raw.len();
    let mut seen = HashSet::with_capacity(input_len);
    let mut warnings = Vec::new();
    let mut keyed = Vec::with_capacity(input_len);

    for (index, record) in raw.into_iter().enumerate() {
        let id = trimmed(record.id.as_deref()).ok_or(ValidationError::MissingId { index })?;

        let activity_sport = trimmed(record.sport.as_deref())
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| UNKNOWN_SPORT.to_string());
        if let Some(wanted) = sport {
            if !activity_sport.eq_ignore_ascii_case(wanted) {
                warnings.push(PartialDataWarning::new(
                    &id,
                    Aggregate::Input,
                    ExclusionReason::SportFiltered,
                ));
                continue;
            }
        }

        if !seen.insert(id.clone()) {
            return Err(ValidationError::DuplicateId(id));
        }

        let (activity, sort_key) = normalize_one(id, activity_sport, record, &mut warnings)?;
        keyed.push((sort_key, activity));
    }

    keyed.sort_by(|(a_key, a), (b_key, b)| {
        compare_start(a_key, b_key).then_with(|| a.id.cmp(&b.id))
    });
    let activities: Vec<Activity> = keyed.into_iter().map(|(_, activity)| activity).collect();

    tracing::debug!(
        input = input_len,
        kept = activities.len(),
        warnings = warnings.len(),
        "Normalized activities"
    );

    Ok(Normalized {
        activities,
        warnings,
    })
}

fn normalize_one(
    id: String,
    sport: String,
    record: RawActivity,
    warnings: &mut Vec<PartialDataWarning>,
) -> Result<(Activity, Option<NaiveDateTime>), ValidationError> {
    let local_raw = trimmed(record.start_time.as_deref());
    let utc_raw = trimmed(record.start_time_utc.as_deref());
    if local_raw.is_none() && utc_raw.is_none() {
        return Err(ValidationError::MissingStartTime { id });
    }

    let local = local_raw.as_deref().and_then(parse_local);
    let utc = utc_raw
        .as_deref()
        .and_then(parse_utc)
        .or_else(|| local.and_then(|l| l.utc));

    // Local calendar day; UTC only when no usable local time exists.
    let date = local
        .map(|l| l.local_date)
        .or_else(|| utc.map(|u| u.date_naive()));
    let sort_key = utc
        .map(|u| u.naive_utc())
        .or_else(|| local.map(|l| l.local));

    let start_time_utc = utc.map(format_utc_rfc3339).or_else(|| utc_raw.clone());
    let start_time = match local_raw {
        Some(value) => value,
        None => start_time_utc.clone().unwrap_or_default(),
    };

    let distance_m = checked_non_negative(&id, "distanceM", record.distance_m)?;
    let duration_s = checked_non_negative(&id, "durationS", record.duration_s)?;

    let avg_hr = match record.avg_hr {
        Some(hr) if hr.is_finite() && hr > 0.0 => Some(hr),
        Some(_) => {
            warnings.push(PartialDataWarning::new(
                &id,
                Aggregate::Input,
                ExclusionReason::InvalidHeartRate,
            ));
            None
        }
        None => None,
    };

    let lat = record.lat.and_then(normalize_coordinate);
    let lon = record.lon.and_then(normalize_coordinate);
    let (lat, lon) = match (lat, lon) {
        (Some(lat), Some(lon)) => (Some(lat), Some(lon)),
        (None, None) => (None, None),
        _ => {
            warnings.push(PartialDataWarning::new(
                &id,
                Aggregate::Input,
                ExclusionReason::IncompleteCoordinates,
            ));
            (None, None)
        }
    };

    let activity = Activity {
        source_file: trimmed(record.source_file.as_deref()),
        sport,
        start_time,
        start_time_utc,
        date,
        distance_m,
        duration_s,
        pace_sec_per_km: pace_sec_per_km(distance_m, duration_s),
        avg_hr,
        lat,
        lon,
        city: trimmed(record.city.as_deref()).unwrap_or_else(|| UNKNOWN_CITY.to_string()),
        country: trimmed(record.country.as_deref()),
        admin1: trimmed(record.admin1.as_deref()),
        id,
    };

    Ok((activity, sort_key))
}

/// Present timestamps first in ascending order, unparsable ones last.
fn compare_start(a: &Option<NaiveDateTime>, b: &Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn checked_non_negative(
    id: &str,
    field: &'static str,
    value: Option<f64>,
) -> Result<Option<f64>, ValidationError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ValidationError::InvalidNumber {
            id: id.to_string(),
            field,
            value: v,
        }),
        other => Ok(other),
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
