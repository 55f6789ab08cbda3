//! Percentage-to-points scoring and Power Rank aggregation.
//!
//! Each metric's percentage-of-goal is mapped onto the highest tier boundary it
//! reaches, and the tier's multiplier (from the metric's resolved rule) scales
//! the metric's max points. Points are rounded to 2 decimals per metric; the
//! total and the index are each rounded exactly once more.

pub mod adjustment;

use serde::{Deserialize, Serialize};

use crate::config::{ResolvedMetric, ScoringConfig};
use crate::errors::{Error, Result};
use crate::records::Record;

/// Round to 2 decimal places
#[inline]
pub fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Points earned by one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoints {
    pub metric: String,
    pub points_key: String,
    pub points: f64,
}

/// Per-metric points for one record, with derived total and index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsResult {
    metrics: Vec<MetricPoints>,
    total_points: f64,
    power_rank: f64,
    adjusted: bool,
}

impl PointsResult {
    fn new(metrics: Vec<MetricPoints>, adjusted: bool) -> Self {
        let (total_points, power_rank) = total_and_index(&metrics);
        Self {
            metrics,
            total_points,
            power_rank,
            adjusted,
        }
    }

    /// Points in metric declaration order
    pub fn metrics(&self) -> &[MetricPoints] {
        &self.metrics
    }

    /// Points for a metric id (`opps_pct`) or its points key (`opps_points`)
    pub fn points(&self, key: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|entry| entry.metric == key || entry.points_key == key)
            .map(|entry| entry.points)
    }

    pub fn total_points(&self) -> f64 {
        self.total_points
    }

    pub fn power_rank(&self) -> f64 {
        self.power_rank
    }

    /// Whether the cross-metric adjustment reduced any points
    pub fn adjusted(&self) -> bool {
        self.adjusted
    }
}

/// Convert one metric's percentage into points.
///
/// An absent percentage is the defined "no data" outcome and scores 0.
pub fn score_metric(config: &ScoringConfig, metric_id: &str, percentage: Option<f64>) -> Result<f64> {
    let Some(percent) = percentage else {
        return Ok(0.0);
    };
    let resolved = config.resolve(metric_id)?;
    score_resolved(config, &resolved, percent)
}

fn score_resolved(config: &ScoringConfig, resolved: &ResolvedMetric<'_>, percent: f64) -> Result<f64> {
    if !resolved.rule.permits(percent) {
        return Ok(0.0);
    }

    // Unreachable with a 0 floor boundary
    let Some(boundary) = config.thresholds.tier_for(percent) else {
        return Ok(0.0);
    };

    let multiplier = resolved.rule.multipliers.get(boundary).ok_or_else(|| {
        Error::configuration(format!(
            "{:?} multiplier map has no entry for boundary {} (metric {})",
            resolved.rule.kind, boundary, resolved.definition.id
        ))
    })?;

    let max_points = resolved.definition.max_points;
    Ok(round_score(max_points * multiplier).max(0.0).min(max_points))
}

/// Score every configured metric of a record, then apply the HTP adjustment
pub fn score_record(config: &ScoringConfig, record: &Record) -> Result<PointsResult> {
    let mut metrics = config
        .metrics
        .iter()
        .map(|metric| {
            Ok(MetricPoints {
                metric: metric.id.clone(),
                points_key: metric.points_key(),
                points: score_metric(config, &metric.id, record.value(&metric.id))?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let adjusted = adjustment::apply(record, &mut metrics);
    Ok(PointsResult::new(metrics, adjusted))
}

/// Total points and Power Rank, each rounded once to 2 decimals
pub fn total_and_index(metrics: &[MetricPoints]) -> (f64, f64) {
    let total = round_score(metrics.iter().map(|entry| entry.points).sum());
    (total, round_score((total / 100.0) * 10.0))
}
