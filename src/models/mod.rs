// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the pipeline and its artifacts.

pub mod activity;
pub mod distribution;
pub mod records;
pub mod report;
pub mod stats;

pub use activity::{Activity, DailyActivity, RawActivity, UNKNOWN_CITY, UNKNOWN_SPORT};
pub use distribution::{Distribution, DistributionBin, Distributions};
pub use records::{BestRecord, PersonalBests};
pub use report::{Aggregate, ExclusionReason, PartialDataWarning, RunReport, Tallied};
pub use stats::{CityStat, Daily, Monthly, Summary};
