// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pipeline orchestrator.
//!
//! Handles one batch run:
//! 1. Normalize the raw records (any validation error aborts the run)
//! 2. Run the temporal, geo, histogram and best-of components over the
//!    same read-only activity list
//! 3. Assemble the artifact set and the run report
//!
//! Nothing is written until every component has finished.

use std::path::PathBuf;

use crate::config::{BinWidths, Config, ConfigError};
use crate::error::Result;
use crate::models::{
    Activity, CityStat, Daily, Distributions, Monthly, PersonalBests, RawActivity, RunReport,
    Summary, Tallied,
};
use crate::services::temporal::TemporalRollups;
use crate::services::{artifacts, best_of, geo, histogram, loader, normalizer, temporal};

/// Every artifact produced by one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSet {
    pub activities: Vec<Activity>,
    pub daily: Vec<Daily>,
    pub summary: Summary,
    pub monthly: Vec<Monthly>,
    pub city_stats: Vec<CityStat>,
    pub distributions: Distributions,
    pub records: PersonalBests,
}

/// Artifacts plus the bookkeeping of the run that produced them.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub artifacts: ArtifactSet,
    pub report: RunReport,
}

/// A configured, reusable pipeline.
///
/// `Pipeline::default()` uses the default bin widths and keeps every sport.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    bins: BinWidths,
    sport: Option<String>,
}

type Components = (
    Tallied<TemporalRollups>,
    Tallied<Vec<CityStat>>,
    std::result::Result<Tallied<Distributions>, ConfigError>,
    PersonalBests,
);

impl Pipeline {
    /// Create a pipeline, rejecting invalid bin widths up front.
    pub fn new(bins: BinWidths, sport: Option<String>) -> std::result::Result<Self, ConfigError> {
        bins.validate()?;
        Ok(Self { bins, sport })
    }

    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        Self::new(config.bins, config.sport.clone())
    }

    /// Run every component over `raw` and assemble the artifacts.
    pub fn run(&self, raw: Vec<RawActivity>) -> Result<PipelineOutput> {
        let input_records = raw.len();
        let normalized = normalizer::normalize(raw, self.sport.as_deref())?;
        let activities = normalized.activities;

        let (rollups, cities, distributions, records) = self.run_components(&activities);
        let distributions = distributions?;

        let mut city_stats = cities.output;
        geo::sort_by_distance_desc(&mut city_stats);

        let summary = Summary::from_daily(&rollups.output.daily);

        let mut warnings = normalized.warnings;
        warnings.extend(rollups.warnings);
        warnings.extend(cities.warnings);
        warnings.extend(distributions.warnings);

        let report = RunReport {
            input_records,
            activities: activities.len(),
            warnings,
        };

        tracing::info!(
            activities = activities.len(),
            days = summary.total_days,
            distance_m = summary.total_distance_m,
            cities = city_stats.len(),
            "Pipeline finished"
        );

        Ok(PipelineOutput {
            artifacts: ArtifactSet {
                activities,
                daily: rollups.output.daily,
                summary,
                monthly: rollups.output.monthly,
                city_stats,
                distributions: distributions.output,
                records,
            },
            report,
        })
    }

    #[cfg(feature = "parallel")]
    fn run_components(&self, activities: &[Activity]) -> Components {
        let ((rollups, cities), (distributions, records)) = rayon::join(
            || {
                rayon::join(
                    || temporal::aggregate(activities),
                    || geo::build_city_stats(activities),
                )
            },
            || {
                rayon::join(
                    || histogram::build_distributions(activities, &self.bins),
                    || best_of::find_personal_bests(activities),
                )
            },
        );
        (rollups, cities, distributions, records)
    }

    #[cfg(not(feature = "parallel"))]
    fn run_components(&self, activities: &[Activity]) -> Components {
        (
            temporal::aggregate(activities),
            geo::build_city_stats(activities),
            histogram::build_distributions(activities, &self.bins),
            best_of::find_personal_bests(activities),
        )
    }
}

/// Load input, run the pipeline and write the artifacts described by `config`.
pub fn execute(config: &Config) -> Result<(RunReport, Vec<PathBuf>)> {
    let pipeline = Pipeline::from_config(config)?;
    let raw = loader::load_raw_activities(&config.input)?;
    let output = pipeline.run(raw)?;
    let written = artifacts::write_all(&output.artifacts, &config.out_dir)?;
    Ok((output.report, written))
}
