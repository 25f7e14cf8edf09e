// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Runboard: derive dashboard data from a personal running log
//!
//! This crate turns decoded running activities into the JSON artifacts a
//! static dashboard reads: daily and monthly rollups, a lifetime summary,
//! per-city statistics, pace/heart-rate/distance histograms and personal
//! bests. Every run recomputes everything from the full activity set.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use config::Config;
pub use error::{AppError, Result, ValidationError};
pub use services::{ArtifactSet, Pipeline, PipelineOutput};
