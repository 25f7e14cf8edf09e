// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reads decoded activity records from disk.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::RawActivity;

/// A JSON document holding either one activity or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBatch {
    Many(Vec<RawActivity>),
    One(RawActivity),
}

/// Load raw activities from a JSON file or a directory of JSON files.
///
/// Directory entries are read in file-name order so the input order is
/// reproducible across runs.
pub fn load_raw_activities<P: AsRef<Path>>(path: P) -> Result<Vec<RawActivity>> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|e| AppError::io(path, e))?;

    let files = if metadata.is_dir() {
        json_files_in(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut activities = Vec::new();
    for file in &files {
        activities.extend(load_file(file)?);
    }

    tracing::info!(
        path = %path.display(),
        files = files.len(),
        records = activities.len(),
        "Loaded raw activities"
    );
    Ok(activities)
}

/// Parse raw activities from a JSON string.
pub fn parse_raw_activities(json: &str) -> std::result::Result<Vec<RawActivity>, serde_json::Error> {
    Ok(match serde_json::from_str::<RawBatch>(json)? {
        RawBatch::Many(list) => list,
        RawBatch::One(single) => vec![single],
    })
}

fn load_file(path: &Path) -> Result<Vec<RawActivity>> {
    let data = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    parse_raw_activities(&data).map_err(|e| AppError::json(path, e))
}

fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| AppError::io(dir, e))? {
        let entry = entry.map_err(|e| AppError::io(dir, e))?;
        let path = entry.path();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
