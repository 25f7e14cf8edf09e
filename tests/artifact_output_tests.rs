// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Artifact writing and the full load → run → write path.

use runboard::config::{BinWidths, Config};
use runboard::services::artifacts::{self, RenderedArtifact};
use runboard::services::execute;
use runboard::{AppError, Pipeline};
use std::fs;

mod common;
use common::scenario;

const EXPECTED_FILES: &[&str] = &[
    "activities.json",
    "city-stats.json",
    "daily.json",
    "distributions.json",
    "monthly.json",
    "records.json",
    "summary.json",
];

fn listing(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_write_all_creates_every_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("derived");
    let artifacts = Pipeline::default().run(scenario()).unwrap().artifacts;

    let written = artifacts::write_all(&artifacts, &out_dir).expect("write");

    assert_eq!(written.len(), EXPECTED_FILES.len());
    assert_eq!(listing(&out_dir), EXPECTED_FILES);
    // No staging leftovers next to the output.
    assert_eq!(listing(tmp.path()), vec!["derived".to_string()]);

    let summary: serde_json::Value =
        serde_json::from_slice(&fs::read(out_dir.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["totalDistanceM"], 15000.0);
}

#[test]
fn test_rewrite_replaces_previous_output() {
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("derived");

    let artifacts = Pipeline::default().run(scenario()).unwrap().artifacts;
    artifacts::write_all(&artifacts, &out_dir).unwrap();
    let first = fs::read(out_dir.join("daily.json")).unwrap();

    artifacts::write_all(&artifacts, &out_dir).unwrap();
    let second = fs::read(out_dir.join("daily.json")).unwrap();

    assert_eq!(first, second);
    assert_eq!(listing(&out_dir), EXPECTED_FILES);
    assert_eq!(listing(tmp.path()), vec!["derived".to_string()]);
}

#[test]
fn test_shared_directory_is_not_clobbered() {
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("public");
    fs::create_dir_all(&out_dir).unwrap();
    fs::write(out_dir.join("index.html"), b"<html></html>").unwrap();
    fs::write(out_dir.join("summary.json"), b"{}").unwrap();

    let artifacts = Pipeline::default().run(scenario()).unwrap().artifacts;
    let err = artifacts::write_all(&artifacts, &out_dir).unwrap_err();

    assert!(matches!(err, AppError::ForeignOutput { ref entry, .. } if entry.ends_with("index.html")));
    assert_eq!(fs::read(out_dir.join("index.html")).unwrap(), b"<html></html>");
    assert_eq!(fs::read(out_dir.join("summary.json")).unwrap(), b"{}");
    assert_eq!(listing(tmp.path()), vec!["public".to_string()]);
}

#[test]
fn test_failed_write_leaves_previous_output() {
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("derived");
    let artifacts = Pipeline::default().run(scenario()).unwrap().artifacts;
    artifacts::write_all(&artifacts, &out_dir).unwrap();
    let before = fs::read(out_dir.join("summary.json")).unwrap();

    // A file name that is a directory path cannot be written.
    let broken = vec![
        RenderedArtifact {
            file_name: "summary.json",
            bytes: b"{}".to_vec(),
        },
        RenderedArtifact {
            file_name: "missing/daily.json",
            bytes: b"[]".to_vec(),
        },
    ];
    let err = artifacts::write_rendered(&broken, &out_dir).unwrap_err();

    assert!(matches!(err, AppError::Io { .. }));
    assert_eq!(fs::read(out_dir.join("summary.json")).unwrap(), before);
    assert_eq!(listing(tmp.path()), vec!["derived".to_string()]);
}

#[test]
fn test_execute_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("activities.json");
    fs::write(
        &input,
        r#"[
            {"id": "b", "sport": "running", "startTime": "2024-01-01T18:00:00+08:00",
             "distanceM": 2000, "durationS": 600},
            {"id": "ride", "sport": "cycling", "startTime": "2024-01-01T12:00:00+08:00",
             "distanceM": 30000, "durationS": 3600},
            {"id": "a", "sport": "Running", "startTime": "2024-01-01T07:00:00+08:00",
             "distanceM": 3000, "durationS": 900, "city": "unknown"}
        ]"#,
    )
    .unwrap();

    let config = Config {
        input,
        out_dir: tmp.path().join("out"),
        ..Config::default()
    };

    let (report, written) = execute(&config).expect("run");

    // Only runs are kept by default.
    assert_eq!(report.input_records, 3);
    assert_eq!(report.activities, 2);
    assert_eq!(written.len(), EXPECTED_FILES.len());

    let daily: serde_json::Value =
        serde_json::from_slice(&fs::read(tmp.path().join("out/daily.json")).unwrap()).unwrap();
    assert_eq!(daily[0]["distanceM"], 5000.0);
    assert_eq!(daily[0]["activities"][0]["id"], "a");
    assert_eq!(daily[0]["activities"][1]["id"], "b");

    let records: serde_json::Value =
        serde_json::from_slice(&fs::read(tmp.path().join("out/records.json")).unwrap()).unwrap();
    assert_eq!(records["longest"]["activityId"], "a");
}

#[test]
fn test_execute_reads_directory_input() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("decoded");
    fs::create_dir_all(&input).unwrap();
    fs::write(
        input.join("002.json"),
        r#"{"id": "two", "sport": "running", "startTime": "2024-05-02T07:00:00+08:00", "distanceM": 5000, "durationS": 1500}"#,
    )
    .unwrap();
    fs::write(
        input.join("001.json"),
        r#"[{"id": "one", "sport": "running", "startTime": "2024-05-01T07:00:00+08:00", "distanceM": 4000, "durationS": 1300}]"#,
    )
    .unwrap();
    fs::write(input.join("notes.txt"), "ignored").unwrap();

    let config = Config {
        input,
        out_dir: tmp.path().join("out"),
        ..Config::default()
    };
    let (report, _) = execute(&config).expect("run");

    assert_eq!(report.input_records, 2);
    let records: serde_json::Value =
        serde_json::from_slice(&fs::read(tmp.path().join("out/records.json")).unwrap()).unwrap();
    assert_eq!(records["best5k"]["activityId"], "two");
    assert!(records["best10k"].is_null());
}

#[test]
fn test_invalid_input_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("activities.json");
    fs::write(
        &input,
        r#"[{"id": "x", "sport": "running", "startTime": "2024-01-01"},
            {"id": "x", "sport": "running", "startTime": "2024-01-02"}]"#,
    )
    .unwrap();
    let out_dir = tmp.path().join("out");

    let config = Config {
        input,
        out_dir: out_dir.clone(),
        ..Config::default()
    };
    let err = execute(&config).unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.is_input_error());
    assert!(!out_dir.exists());
}

#[test]
fn test_bad_bin_width_fails_before_reading_input() {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config {
        input: tmp.path().join("does-not-exist.json"),
        out_dir: tmp.path().join("out"),
        bins: BinWidths {
            pace_sec_per_km: 0.0,
            ..BinWidths::default()
        },
        sport: None,
    };

    let err = execute(&config).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}
