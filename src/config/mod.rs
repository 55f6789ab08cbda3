//! Scoring configuration: metric definitions plus the threshold table.
//!
//! A [`ScoringConfig`] is built once at startup, either from the built-in
//! defaults or from a `.powerrank.toml`, validated, and then passed by
//! reference into the scoring and recommendation engines. Nothing mutates it
//! afterwards.

mod loader;
mod metrics;
pub mod thresholds;
pub mod validation;

pub use loader::{
    directory_ancestors, load_config, load_config_from_path, parse_and_validate_config,
    render_default_config, CONFIG_FILE_NAME,
};
pub use metrics::{default_metrics, points_key, MetricDefinition};
pub use thresholds::{
    MetricRule, MultiplierMap, MultiplierMapKind, ResolvedRule, ThresholdTable, TierMultiplier,
    SUB_50_CUTOFF,
};

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Complete, read-only scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Scored metrics in declaration order
    #[serde(default = "default_metrics")]
    pub metrics: Vec<MetricDefinition>,

    #[serde(default)]
    pub thresholds: ThresholdTable,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            metrics: default_metrics(),
            thresholds: ThresholdTable::default(),
        }
    }
}

/// A metric definition paired with its resolved rule
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMetric<'a> {
    pub definition: &'a MetricDefinition,
    pub rule: ResolvedRule<'a>,
}

impl ScoringConfig {
    pub fn metric(&self, metric_id: &str) -> Option<&MetricDefinition> {
        self.metrics.iter().find(|m| m.id == metric_id)
    }

    /// Look up a metric and resolve its rule, failing on unknown identifiers
    pub fn resolve(&self, metric_id: &str) -> Result<ResolvedMetric<'_>> {
        let definition = self
            .metric(metric_id)
            .ok_or_else(|| Error::configuration(format!("Unknown metric: {}", metric_id)))?;
        if !(definition.max_points.is_finite() && definition.max_points > 0.0) {
            return Err(Error::configuration(format!(
                "max_points for {} must be positive (got {})",
                metric_id, definition.max_points
            )));
        }
        Ok(ResolvedMetric {
            definition,
            rule: self.thresholds.resolve_rule(metric_id),
        })
    }

    /// Sum of metric maxima; 100 under the built-in configuration
    pub fn max_total_points(&self) -> f64 {
        self.metrics.iter().map(|m| m.max_points).sum()
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_config_result(self)?;
        for id in validation::unused_overrides(self) {
            log::warn!("Override for undeclared metric {} has no effect", id);
        }
        Ok(())
    }
}
