// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Artifact serialization and batch-atomic output.
//!
//! Every artifact is rendered to bytes before any file is touched. Files
//! are then written into a staging directory next to the output directory
//! and swapped in as a whole, so a failed run leaves the previous output
//! untouched and never a mix of old and new files.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::services::pipeline::ArtifactSet;

pub const SUMMARY_FILE: &str = "summary.json";
pub const DAILY_FILE: &str = "daily.json";
pub const MONTHLY_FILE: &str = "monthly.json";
pub const CITY_STATS_FILE: &str = "city-stats.json";
pub const DISTRIBUTIONS_FILE: &str = "distributions.json";
pub const ACTIVITIES_FILE: &str = "activities.json";
pub const RECORDS_FILE: &str = "records.json";

/// Every file name the pipeline owns inside the output directory.
pub const ARTIFACT_FILES: &[&str] = &[
    ACTIVITIES_FILE,
    DAILY_FILE,
    SUMMARY_FILE,
    MONTHLY_FILE,
    CITY_STATS_FILE,
    DISTRIBUTIONS_FILE,
    RECORDS_FILE,
];

/// One serialized artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

fn render<T: Serialize>(file_name: &'static str, value: &T) -> Result<RenderedArtifact> {
    let bytes = serde_json::to_vec(value).map_err(|e| AppError::json(file_name, e))?;
    Ok(RenderedArtifact { file_name, bytes })
}

/// Serialize every artifact as compact JSON.
pub fn render_all(artifacts: &ArtifactSet) -> Result<Vec<RenderedArtifact>> {
    Ok(vec![
        render(ACTIVITIES_FILE, &artifacts.activities)?,
        render(DAILY_FILE, &artifacts.daily)?,
        render(SUMMARY_FILE, &artifacts.summary)?,
        render(MONTHLY_FILE, &artifacts.monthly)?,
        render(CITY_STATS_FILE, &artifacts.city_stats)?,
        render(DISTRIBUTIONS_FILE, &artifacts.distributions)?,
        render(RECORDS_FILE, &artifacts.records)?,
    ])
}

/// Write all artifacts to `out_dir`, all or nothing.
///
/// `out_dir` is replaced as a whole, so it must hold nothing but artifacts;
/// any other entry fails the write with [`AppError::ForeignOutput`] before
/// anything is touched.
pub fn write_all(artifacts: &ArtifactSet, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let rendered = render_all(artifacts)?;
    write_rendered(&rendered, out_dir)
}

/// Write pre-rendered artifacts to `out_dir`, all or nothing.
pub fn write_rendered(rendered: &[RenderedArtifact], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let staging = sibling(out_dir, "staging");
    let previous = sibling(out_dir, "previous");

    check_owned(rendered, out_dir)?;

    if let Some(parent) = out_dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
    }
    remove_if_exists(&staging)?;

    if let Err(err) = stage(rendered, &staging) {
        let _ = fs::remove_dir_all(&staging);
        return Err(err);
    }

    if let Err(err) = remove_if_exists(&previous) {
        let _ = fs::remove_dir_all(&staging);
        return Err(err);
    }
    let had_previous = out_dir.exists();
    if had_previous {
        fs::rename(out_dir, &previous).map_err(|e| {
            let _ = fs::remove_dir_all(&staging);
            AppError::io(out_dir, e)
        })?;
    }

    if let Err(e) = fs::rename(&staging, out_dir) {
        if had_previous {
            let _ = fs::rename(&previous, out_dir);
        }
        let _ = fs::remove_dir_all(&staging);
        return Err(AppError::io(out_dir, e));
    }

    if had_previous {
        if let Err(e) = fs::remove_dir_all(&previous) {
            tracing::warn!(path = %previous.display(), error = %e, "Failed to remove previous output");
        }
    }

    let written: Vec<PathBuf> = rendered.iter().map(|r| out_dir.join(r.file_name)).collect();
    tracing::info!(
        out_dir = %out_dir.display(),
        files = written.len(),
        "Artifacts written"
    );
    Ok(written)
}

/// Refuse to replace a directory holding anything the pipeline did not write.
fn check_owned(rendered: &[RenderedArtifact], out_dir: &Path) -> Result<()> {
    let entries = match fs::read_dir(out_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(AppError::io(out_dir, e)),
    };

    for entry in entries {
        let entry = entry.map_err(|e| AppError::io(out_dir, e))?;
        let name = entry.file_name();
        let owned = name.to_str().is_some_and(|name| {
            ARTIFACT_FILES.contains(&name) || rendered.iter().any(|r| r.file_name == name)
        });
        if !owned || !entry.path().is_file() {
            return Err(AppError::ForeignOutput {
                dir: out_dir.to_path_buf(),
                entry: entry.path(),
            });
        }
    }
    Ok(())
}

fn stage(rendered: &[RenderedArtifact], staging: &Path) -> Result<()> {
    fs::create_dir_all(staging).map_err(|e| AppError::io(staging, e))?;
    for artifact in rendered {
        let path = staging.join(artifact.file_name);
        fs::write(&path, &artifact.bytes).map_err(|e| AppError::io(&path, e))?;
    }
    Ok(())
}

fn sibling(dir: &Path, suffix: &str) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    dir.with_file_name(format!(".{name}.{suffix}"))
}

fn remove_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|e| AppError::io(path, e))?;
    }
    Ok(())
}
