// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use runboard::models::RawActivity;

/// Floating-point tolerance for summed distances.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-6;

/// Build a raw activity with the commonly used fields.
#[allow(dead_code)]
pub fn raw_activity(id: &str, start_time: &str, distance_m: f64, duration_s: f64) -> RawActivity {
    RawActivity {
        id: Some(id.to_string()),
        source_file: Some(format!("{id}.fit")),
        sport: Some("running".to_string()),
        start_time: Some(start_time.to_string()),
        distance_m: Some(distance_m),
        duration_s: Some(duration_s),
        ..RawActivity::default()
    }
}

/// Same as [`raw_activity`], resolved to a place.
#[allow(dead_code)]
pub fn raw_activity_in(
    id: &str,
    start_time: &str,
    distance_m: f64,
    duration_s: f64,
    city: &str,
    admin1: &str,
) -> RawActivity {
    RawActivity {
        city: Some(city.to_string()),
        country: Some("CN".to_string()),
        admin1: Some(admin1.to_string()),
        lat: Some(31.23),
        lon: Some(121.47),
        ..raw_activity(id, start_time, distance_m, duration_s)
    }
}

/// The three-activity scenario used across tests.
#[allow(dead_code)]
pub fn scenario() -> Vec<RawActivity> {
    vec![
        raw_activity("jan-1-a", "2024-01-01T07:00:00+08:00", 3000.0, 900.0),
        raw_activity("jan-1-b", "2024-01-01T18:00:00+08:00", 2000.0, 600.0),
        raw_activity_in(
            "feb-10",
            "2024-02-10T07:00:00+08:00",
            10000.0,
            3000.0,
            "Shanghai",
            "Shanghai",
        ),
    ]
}
