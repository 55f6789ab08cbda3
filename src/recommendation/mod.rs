//! Gap analysis toward a target Power Rank.
//!
//! For every metric with both a goal and a current value, the plan finds the
//! next tier boundary the metric can reach, what that tier is worth, and how
//! much progress is needed today to be on pace for it. Recommendations are
//! ranked by point gain; ties keep metric declaration order.

mod pacing;

pub use pacing::{estimate_progress_needed, PeriodPosition};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::errors::{Error, Result};
use crate::records::Record;
use crate::scoring::{round_score, score_metric, score_record};

/// One metric worth pushing and what it takes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub metric: String,
    pub current_percent: f64,
    pub current_points: f64,
    pub next_threshold: f64,
    pub next_points: f64,
    pub point_gain: f64,
    /// Raw units still needed today to be on pace for `next_threshold`
    pub needed_more_by_today: u64,
}

/// Target, baseline and ranked recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub target_rank: f64,
    pub target_points: f64,
    pub current_points: f64,
    pub shortfall_points: f64,
    pub recommendations: Vec<Recommendation>,
}

impl Plan {
    /// Whether the current baseline already meets the target
    pub fn on_target(&self) -> bool {
        self.shortfall_points <= 0.0
    }

    /// Combined gain if every recommendation were reached
    pub fn potential_gain(&self) -> f64 {
        round_score(self.recommendations.iter().map(|r| r.point_gain).sum())
    }
}

/// Build a plan to reach `target_index` given goals and current values.
///
/// The baseline total scores `current_values` directly as a record, so the
/// secondary HTP indicator, when present, adjusts it as usual.
pub fn build_plan(
    config: &ScoringConfig,
    goals: &BTreeMap<String, f64>,
    current_values: &BTreeMap<String, f64>,
    period: PeriodPosition,
    target_index: f64,
) -> Result<Plan> {
    if period.days_in_period <= 0 {
        return Err(Error::invalid_argument(format!(
            "days_in_period must be greater than zero (got {})",
            period.days_in_period
        )));
    }

    let baseline = score_record(config, &Record::from(current_values))?;
    let current_total = baseline.total_points();

    let target_points = (target_index / 10.0) * 100.0;
    let shortfall = round_score(target_points - current_total).max(0.0);

    let mut recommendations = Vec::new();
    for metric in &config.metrics {
        let (Some(&current_value), Some(&goal_value)) =
            (current_values.get(&metric.id), goals.get(&metric.id))
        else {
            continue;
        };
        if let Some(rec) = recommend_metric(config, &metric.id, current_value, goal_value, period)? {
            recommendations.push(rec);
        }
    }

    let recommendations = rank_by_gain(recommendations);
    log::info!(
        "Plan toward {:.2}: baseline {:.2} pts, shortfall {:.2}, {} recommendation(s)",
        target_index,
        current_total,
        shortfall,
        recommendations.len()
    );

    Ok(Plan {
        target_rank: target_index,
        target_points: round_score(target_points),
        current_points: current_total,
        shortfall_points: shortfall,
        recommendations,
    })
}

fn recommend_metric(
    config: &ScoringConfig,
    metric_id: &str,
    current_value: f64,
    goal_value: f64,
    period: PeriodPosition,
) -> Result<Option<Recommendation>> {
    let current_percent = if goal_value != 0.0 {
        (current_value / goal_value) * 100.0
    } else {
        0.0
    };
    let current_points = score_metric(config, metric_id, Some(current_percent))?;

    let rule = config.resolve(metric_id)?.rule;
    let Some(next_threshold) = config
        .thresholds
        .next_boundary_above(current_percent, rule.allow_below_50)
    else {
        log::debug!("{} at {:.2}% has no higher tier", metric_id, current_percent);
        return Ok(None);
    };

    let next_points = score_metric(config, metric_id, Some(next_threshold))?;
    let point_gain = round_score((next_points - current_points).max(0.0));
    if point_gain <= 0.0 {
        return Ok(None);
    }

    let needed_more_by_today = estimate_progress_needed(
        current_value,
        goal_value,
        period.day_of_period,
        period.days_in_period,
        next_threshold,
    )?;

    Ok(Some(Recommendation {
        metric: metric_id.to_string(),
        current_percent: round_score(current_percent),
        current_points,
        next_threshold,
        next_points,
        point_gain,
        needed_more_by_today,
    }))
}

/// Stable sort by descending point gain
pub fn rank_by_gain(mut recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    recommendations.sort_by(|a, b| b.point_gain.total_cmp(&a.point_gain));
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MetricRule, MultiplierMapKind};
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    fn rec(metric: &str, point_gain: f64) -> Recommendation {
        Recommendation {
            metric: metric.to_string(),
            current_percent: 0.0,
            current_points: 0.0,
            next_threshold: 50.0,
            next_points: point_gain,
            point_gain,
            needed_more_by_today: 0,
        }
    }

    #[test]
    fn ranking_is_stable_on_ties() {
        let ranked = rank_by_gain(vec![rec("A", 3.0), rec("B", 5.0), rec("C", 5.0), rec("D", 1.0)]);
        let order: Vec<&str> = ranked.iter().map(|r| r.metric.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn next_tier_is_lowest_boundary_above_current() {
        let config = ScoringConfig::default();
        let plan = build_plan(
            &config,
            &values(&[("opps_pct", 100.0)]),
            &values(&[("opps_pct", 61.0)]),
            PeriodPosition::new(15, 30),
            8.0,
        )
        .unwrap();

        assert_eq!(plan.recommendations.len(), 1);
        let rec = &plan.recommendations[0];
        assert_eq!(rec.next_threshold, 70.0);
        assert_eq!(rec.current_points, 6.0);
        assert_eq!(rec.next_points, 7.0);
        assert_eq!(rec.point_gain, 1.0);
        // 100 / 30 * 15 * 0.7 = 35, already at 61
        assert_eq!(rec.needed_more_by_today, 0);
    }

    #[test]
    fn sub_50_metric_targets_the_50_tier() {
        let config = ScoringConfig::default();
        let plan = build_plan(
            &config,
            &values(&[("ppvga_pct", 200.0)]),
            &values(&[("ppvga_pct", 40.0)]),
            PeriodPosition::new(20, 20),
            5.0,
        )
        .unwrap();

        let rec = &plan.recommendations[0];
        assert_eq!(rec.current_percent, 20.0);
        assert_eq!(rec.next_threshold, 50.0);
        assert_eq!(rec.point_gain, 15.0);
        // full period at 50% of 200 = 100
        assert_eq!(rec.needed_more_by_today, 60);
    }

    #[test]
    fn sub_50_allowed_metric_targets_next_low_tier() {
        let mut config = ScoringConfig::default();
        config.thresholds.overrides.insert(
            "opps_pct".to_string(),
            MetricRule {
                multipliers: MultiplierMapKind::Default,
                allow_below_50: true,
            },
        );
        let plan = build_plan(
            &config,
            &values(&[("opps_pct", 200.0)]),
            &values(&[("opps_pct", 50.0)]),
            PeriodPosition::new(10, 10),
            5.0,
        )
        .unwrap();

        let rec = &plan.recommendations[0];
        assert_eq!(rec.current_percent, 25.0);
        assert_eq!(rec.current_points, 2.0);
        assert_eq!(rec.next_threshold, 30.0);
        assert_eq!(rec.next_points, 3.0);
        assert_eq!(rec.point_gain, 1.0);
        // full period at 30% of 200 = 60
        assert_eq!(rec.needed_more_by_today, 10);
    }

    #[test]
    fn flat_tier_yields_no_recommendation() {
        let config = ScoringConfig::default();
        // 83% on a five-point curve is already full credit; 90% adds nothing
        let plan = build_plan(
            &config,
            &values(&[("csat_pct", 100.0)]),
            &values(&[("csat_pct", 83.0)]),
            PeriodPosition::new(10, 30),
            9.0,
        )
        .unwrap();
        assert!(plan.recommendations.is_empty());
    }

    #[test]
    fn top_tier_metric_is_skipped() {
        let config = ScoringConfig::default();
        let plan = build_plan(
            &config,
            &values(&[("opps_pct", 10.0)]),
            &values(&[("opps_pct", 13.0)]),
            PeriodPosition::new(10, 30),
            9.0,
        )
        .unwrap();
        assert!(plan.recommendations.is_empty());
    }

    #[test]
    fn metric_without_goal_or_current_is_skipped() {
        let config = ScoringConfig::default();
        let plan = build_plan(
            &config,
            &values(&[("opps_pct", 100.0)]),
            &values(&[("csat_pct", 10.0)]),
            PeriodPosition::new(10, 30),
            9.0,
        )
        .unwrap();
        assert!(plan.recommendations.is_empty());
    }

    #[test]
    fn zero_goal_counts_as_zero_percent() {
        let config = ScoringConfig::default();
        let plan = build_plan(
            &config,
            &values(&[("opps_pct", 0.0)]),
            &values(&[("opps_pct", 5.0)]),
            PeriodPosition::new(10, 30),
            9.0,
        )
        .unwrap();
        let rec = &plan.recommendations[0];
        assert_eq!(rec.current_percent, 0.0);
        assert_eq!(rec.next_threshold, 50.0);
        assert_eq!(rec.needed_more_by_today, 0);
    }

    #[test]
    fn shortfall_is_never_negative() {
        let config = ScoringConfig::default();
        let plan = build_plan(
            &config,
            &BTreeMap::new(),
            &values(&[("ppvga_pct", 100.0), ("internet_pct", 100.0)]),
            PeriodPosition::new(10, 30),
            3.0,
        )
        .unwrap();
        assert_eq!(plan.current_points, 50.0);
        assert_eq!(plan.target_points, 30.0);
        assert_eq!(plan.shortfall_points, 0.0);
        assert!(plan.on_target());
    }

    #[test]
    fn invalid_period_fails_before_scoring() {
        let config = ScoringConfig::default();
        let err = build_plan(
            &config,
            &BTreeMap::new(),
            &BTreeMap::new(),
            PeriodPosition::new(1, 0),
            5.0,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
