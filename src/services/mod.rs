// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - pipeline components.

pub mod artifacts;
pub mod best_of;
pub mod geo;
pub mod histogram;
pub mod loader;
pub mod normalizer;
pub mod pipeline;
pub mod temporal;

pub use best_of::{find_personal_bests, select_best, select_best_by, RecordCriterion};
pub use histogram::{build_distribution, build_distributions, Metric};
pub use loader::load_raw_activities;
pub use normalizer::normalize;
pub use pipeline::{execute, ArtifactSet, Pipeline, PipelineOutput};
