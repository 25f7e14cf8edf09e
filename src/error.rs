// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Validation and configuration errors are fatal and abort the run before
//! any artifact is written. Non-fatal exclusions are reported as
//! [`PartialDataWarning`](crate::models::PartialDataWarning) instead.

use std::path::PathBuf;

pub use crate::config::ConfigError;

/// A malformed or inconsistent input record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Activity at input position {index} has no id")]
    MissingId { index: usize },

    #[error("Duplicate activity id: {0}")]
    DuplicateId(String),

    #[error("Activity '{id}' has neither startTime nor startTimeUtc")]
    MissingStartTime { id: String },

    #[error("Activity '{id}' has invalid {field}: {value}")]
    InvalidNumber {
        id: String,
        field: &'static str,
        value: f64,
    },
}

/// Top-level error for a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Refusing to replace {}: {} was not written by runboard", dir.display(), entry.display())]
    ForeignOutput { dir: PathBuf, entry: PathBuf },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        AppError::Json {
            path: path.into(),
            source,
        }
    }

    /// Whether this error was caused by the input records themselves
    /// (as opposed to the environment or the filesystem).
    pub fn is_input_error(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::Json { .. })
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, AppError>;
