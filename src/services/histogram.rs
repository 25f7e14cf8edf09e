// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Histogram builder for pace, heart rate and distance.
//!
//! Bins are contiguous and uniform, starting at 0 and ending with the bin
//! that contains the largest observed value. Only strictly positive values
//! are tallied; a metric with no positive values still yields one empty bin.

use crate::config::{check_bin_width, BinWidths, ConfigError};
use crate::models::{
    Activity, Aggregate, Distribution, DistributionBin, Distributions, ExclusionReason,
    PartialDataWarning, Tallied,
};

/// Upper bound on bins per distribution.
pub const MAX_BINS: usize = 100_000;

/// A per-activity numeric field that can be histogrammed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    PaceSecPerKm,
    AvgHr,
    DistanceM,
}

impl Metric {
    /// Extract this metric from an activity.
    pub fn value(self, activity: &Activity) -> Option<f64> {
        match self {
            Metric::PaceSecPerKm => activity.pace_sec_per_km,
            Metric::AvgHr => activity.avg_hr,
            Metric::DistanceM => activity.distance_m,
        }
    }

    /// Artifact key for this metric.
    pub fn name(self) -> &'static str {
        match self {
            Metric::PaceSecPerKm => "paceSecPerKm",
            Metric::AvgHr => "avgHr",
            Metric::DistanceM => "distanceM",
        }
    }

    fn aggregate(self) -> Aggregate {
        match self {
            Metric::PaceSecPerKm => Aggregate::PaceDistribution,
            Metric::AvgHr => Aggregate::HrDistribution,
            Metric::DistanceM => Aggregate::DistanceDistribution,
        }
    }
}

/// Build the distribution of `metric` with bins of `bin_width`.
pub fn build_distribution(
    activities: &[Activity],
    metric: Metric,
    bin_width: f64,
) -> Result<Tallied<Distribution>, ConfigError> {
    check_bin_width(metric.name(), bin_width)?;

    let mut warnings = Vec::new();
    let mut values = Vec::with_capacity(activities.len());

    for activity in activities {
        match metric.value(activity) {
            Some(v) if v > 0.0 => values.push((v, activity.positive_distance_m().unwrap_or(0.0))),
            Some(_) => warnings.push(PartialDataWarning::new(
                &activity.id,
                metric.aggregate(),
                ExclusionReason::NonPositiveValue,
            )),
            None => warnings.push(PartialDataWarning::new(
                &activity.id,
                metric.aggregate(),
                ExclusionReason::MissingValue,
            )),
        }
    }

    let max = values.iter().map(|(v, _)| *v).fold(0.0_f64, f64::max);
    let bin_count = bin_count(metric, max, bin_width)?;

    let mut bins: Vec<DistributionBin> = (0..bin_count)
        .map(|i| DistributionBin {
            start: i as f64 * bin_width,
            end: (i + 1) as f64 * bin_width,
            count: 0,
            distance_m: 0.0,
        })
        .collect();

    for (value, distance_m) in values {
        let index = ((value / bin_width).floor() as usize).min(bin_count - 1);
        let bin = &mut bins[index];
        bin.count += 1;
        bin.distance_m += distance_m;
    }

    tracing::debug!(
        metric = metric.name(),
        bins = bins.len(),
        excluded = warnings.len(),
        "Built distribution"
    );

    Ok(Tallied::new(
        Distribution {
            bin_size: bin_width,
            bins,
        },
        warnings,
    ))
}

/// Number of bins needed so the last one ends past `max`, capped at [`MAX_BINS`].
fn bin_count(metric: Metric, max: f64, bin_width: f64) -> Result<usize, ConfigError> {
    let too_many = || ConfigError::TooManyBins {
        name: metric.name(),
        bin_width,
        max_value: max,
        limit: MAX_BINS,
    };

    let ratio = (max / bin_width).floor();
    if !ratio.is_finite() || ratio >= MAX_BINS as f64 {
        return Err(too_many());
    }

    let mut count = (ratio as usize).checked_add(1).ok_or_else(too_many)?;
    while (count as f64) * bin_width <= max {
        count = count.checked_add(1).ok_or_else(too_many)?;
    }
    if count > MAX_BINS {
        return Err(too_many());
    }
    Ok(count)
}

/// Build the three standing distributions.
pub fn build_distributions(
    activities: &[Activity],
    widths: &BinWidths,
) -> Result<Tallied<Distributions>, ConfigError> {
    let pace = build_distribution(activities, Metric::PaceSecPerKm, widths.pace_sec_per_km)?;
    let hr = build_distribution(activities, Metric::AvgHr, widths.avg_hr)?;
    let distance = build_distribution(activities, Metric::DistanceM, widths.distance_m)?;

    let mut warnings = pace.warnings;
    warnings.extend(hr.warnings);
    warnings.extend(distance.warnings);

    Ok(Tallied::new(
        Distributions {
            pace_sec_per_km: pace.output,
            avg_hr: hr.output,
            distance_m: distance.output,
        },
        warnings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNKNOWN_CITY;

    fn activity(id: &str, distance_m: Option<f64>, avg_hr: Option<f64>) -> Activity {
        Activity {
            id: id.to_string(),
            source_file: None,
            sport: "running".to_string(),
            start_time: "2024-01-01T08:00:00+00:00".to_string(),
            start_time_utc: None,
            date: None,
            distance_m,
            duration_s: None,
            pace_sec_per_km: None,
            avg_hr,
            lat: None,
            lon: None,
            city: UNKNOWN_CITY.to_string(),
            country: None,
            admin1: None,
        }
    }

    #[test]
    fn test_empty_metric_yields_single_empty_bin() {
        let activities = vec![activity("a", Some(1000.0), None)];
        let result = build_distribution(&activities, Metric::AvgHr, 5.0).unwrap();

        assert_eq!(
            result.output.bins,
            vec![DistributionBin {
                start: 0.0,
                end: 5.0,
                count: 0,
                distance_m: 0.0
            }]
        );
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].reason, ExclusionReason::MissingValue);
    }

    #[test]
    fn test_bins_are_contiguous_and_cover_max() {
        let activities = vec![
            activity("a", Some(2500.0), Some(140.0)),
            activity("b", Some(500.0), Some(151.0)),
            activity("c", Some(5000.0), Some(150.0)),
        ];
        let result = build_distribution(&activities, Metric::DistanceM, 1000.0).unwrap();
        let bins = &result.output.bins;

        // 5000 sits at the start of bin 5, so six bins are needed.
        assert_eq!(bins.len(), 6);
        assert!(bins.last().unwrap().end > 5000.0);
        for pair in bins.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[2].count, 1);
        assert_eq!(bins[5].count, 1);
        assert_eq!(bins[5].distance_m, 5000.0);
        assert_eq!(result.output.total_count(), 3);
    }

    #[test]
    fn test_zero_values_excluded_everywhere() {
        let activities = vec![
            activity("zero", Some(0.0), None),
            activity("one", Some(1.0), None),
        ];
        let result = build_distribution(&activities, Metric::DistanceM, 1000.0).unwrap();

        assert_eq!(result.output.bins.len(), 1);
        assert_eq!(result.output.bins[0].count, 1);
        assert_eq!(result.warnings[0].activity_id, "zero");
        assert_eq!(result.warnings[0].reason, ExclusionReason::NonPositiveValue);
    }

    #[test]
    fn test_distance_summed_per_bin() {
        let activities = vec![
            activity("a", Some(3000.0), Some(151.0)),
            activity("b", Some(2000.0), Some(153.0)),
            activity("c", None, Some(152.0)),
        ];
        let result = build_distribution(&activities, Metric::AvgHr, 5.0).unwrap();
        let bin = &result.output.bins[30];

        assert_eq!(bin.start, 150.0);
        assert_eq!(bin.count, 3);
        assert_eq!(bin.distance_m, 5000.0);
    }

    #[test]
    fn test_huge_value_is_rejected_without_allocating() {
        let activities = vec![activity("far", Some(1e12), None)];
        let err = build_distribution(&activities, Metric::DistanceM, 1000.0).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TooManyBins {
                name: "distanceM",
                limit: MAX_BINS,
                ..
            }
        ));

        let err = build_distribution(&activities, Metric::DistanceM, 1e-300).unwrap_err();
        assert!(matches!(err, ConfigError::TooManyBins { .. }));
    }

    #[test]
    fn test_bin_limit_boundary() {
        // floor(max / width) + 1 bins: exactly MAX_BINS is fine, one more is not.
        let fits = vec![activity("fits", Some((MAX_BINS - 1) as f64), None)];
        let result = build_distribution(&fits, Metric::DistanceM, 1.0).unwrap();
        assert_eq!(result.output.bins.len(), MAX_BINS);

        let over = vec![activity("over", Some(MAX_BINS as f64), None)];
        assert!(build_distribution(&over, Metric::DistanceM, 1.0).is_err());
    }

    #[test]
    fn test_zero_bin_width_is_config_error() {
        let err = build_distribution(&[], Metric::PaceSecPerKm, 0.0).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBinWidth {
                name: "paceSecPerKm",
                value: 0.0
            }
        );
    }
}
