//! Validation with error accumulation for scoring configuration.
//!
//! Every check runs, and all problems are reported together, so a hand-edited
//! `.powerrank.toml` can be fixed in one pass.

use std::collections::HashSet;

use stillwater::{NonEmptyVec, Validation};

use super::thresholds::{MultiplierMap, ThresholdTable};
use super::{MetricDefinition, ScoringConfig};
use crate::errors::{Error, Result};

/// Validation result carrying every configuration problem found.
pub type ConfigValidation<T> = Validation<T, NonEmptyVec<String>>;

fn success() -> ConfigValidation<()> {
    Validation::Success(())
}

fn failures(messages: Vec<String>) -> ConfigValidation<()> {
    match NonEmptyVec::from_vec(messages) {
        Some(errors) => Validation::Failure(errors),
        None => success(),
    }
}

fn combine(validations: Vec<ConfigValidation<()>>) -> ConfigValidation<()> {
    let mut collected = Vec::new();
    for validation in validations {
        if let Validation::Failure(errors) = validation {
            collected.extend(errors.iter().cloned());
        }
    }
    failures(collected)
}

/// Validate the whole config, accumulating ALL errors.
pub fn validate_config(config: &ScoringConfig) -> ConfigValidation<()> {
    combine(vec![
        validate_metrics(&config.metrics),
        validate_boundaries(&config.thresholds.boundaries),
        validate_multiplier_map(
            "default_multipliers",
            &config.thresholds.default_multipliers,
            &config.thresholds.boundaries,
        ),
        validate_multiplier_map(
            "alternate_multipliers",
            &config.thresholds.alternate_multipliers,
            &config.thresholds.boundaries,
        ),
    ])
}

/// Overrides naming metrics the config does not declare. These are inert,
/// typically left over when a config trims the built-in metric list.
pub fn unused_overrides(config: &ScoringConfig) -> Vec<&str> {
    unused_override_ids(&config.thresholds, &config.metrics)
}

/// Fail-fast wrapper returning a single `Configuration` error.
pub fn validate_config_result(config: &ScoringConfig) -> Result<()> {
    match validate_config(config) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => {
            let messages: Vec<String> = errors.iter().cloned().collect();
            Err(Error::configuration(messages.join("; ")))
        }
    }
}

fn validate_metrics(metrics: &[MetricDefinition]) -> ConfigValidation<()> {
    let mut errors = Vec::new();
    if metrics.is_empty() {
        errors.push("at least one metric must be defined".to_string());
    }

    let mut seen = HashSet::new();
    for metric in metrics {
        if metric.id.trim().is_empty() {
            errors.push("metric id must not be empty".to_string());
        } else if !seen.insert(metric.id.as_str()) {
            errors.push(format!("duplicate metric id: {}", metric.id));
        }
        if !(metric.max_points.is_finite() && metric.max_points > 0.0) {
            errors.push(format!(
                "max_points for {} must be positive (got {})",
                metric.id, metric.max_points
            ));
        }
    }
    failures(errors)
}

fn validate_boundaries(boundaries: &[f64]) -> ConfigValidation<()> {
    let mut errors = Vec::new();
    if boundaries.iter().any(|b| !b.is_finite()) {
        errors.push("tier boundaries must be finite".to_string());
    }
    if !boundaries.windows(2).all(|pair| pair[0] > pair[1]) {
        errors.push("tier boundaries must be strictly descending".to_string());
    }
    if boundaries.last() != Some(&0.0) {
        errors.push("tier boundaries must end with a 0 floor".to_string());
    }
    failures(errors)
}

fn validate_multiplier_map(
    name: &str,
    map: &MultiplierMap,
    boundaries: &[f64],
) -> ConfigValidation<()> {
    let mut errors: Vec<String> = boundaries
        .iter()
        .filter(|&&boundary| map.get(boundary).is_none())
        .map(|boundary| format!("{} has no multiplier for boundary {}", name, boundary))
        .collect();

    errors.extend(
        map.entries()
            .iter()
            .filter(|entry| !(0.0..=1.0).contains(&entry.multiplier))
            .map(|entry| {
                format!(
                    "{} multiplier at {} out of range: {} (must be 0.0-1.0)",
                    name, entry.boundary, entry.multiplier
                )
            }),
    );
    failures(errors)
}

fn unused_override_ids<'a>(table: &'a ThresholdTable, metrics: &[MetricDefinition]) -> Vec<&'a str> {
    table
        .overrides
        .keys()
        .filter(|id| !metrics.iter().any(|m| &m.id == *id))
        .map(String::as_str)
        .collect()
}
