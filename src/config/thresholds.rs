use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Percentage below which a metric scores nothing unless its rule allows it.
pub const SUB_50_CUTOFF: f64 = 50.0;

/// Multiplier applied to a metric's max points once a boundary is reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierMultiplier {
    pub boundary: f64,
    pub multiplier: f64,
}

/// Boundary to multiplier lookup for one scoring curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiplierMap(Vec<TierMultiplier>);

impl MultiplierMap {
    pub fn new(entries: Vec<TierMultiplier>) -> Self {
        Self(entries)
    }

    fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|&(boundary, multiplier)| TierMultiplier {
                    boundary,
                    multiplier,
                })
                .collect(),
        )
    }

    /// Multiplier for an exact boundary, if the map declares one
    pub fn get(&self, boundary: f64) -> Option<f64> {
        self.0
            .iter()
            .find(|entry| entry.boundary == boundary)
            .map(|entry| entry.multiplier)
    }

    pub fn entries(&self) -> &[TierMultiplier] {
        &self.0
    }
}

/// Which multiplier map a metric scores against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiplierMapKind {
    #[default]
    Default,
    /// Five-point curve: full credit from 80% upward
    Alternate,
}

/// Per-metric override as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricRule {
    #[serde(default)]
    pub multipliers: MultiplierMapKind,
    #[serde(default)]
    pub allow_below_50: bool,
}

/// Fully resolved rule for one metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRule<'a> {
    pub kind: MultiplierMapKind,
    pub multipliers: &'a MultiplierMap,
    pub allow_below_50: bool,
}

impl ResolvedRule<'_> {
    /// Whether a boundary or percentage at this level may earn points
    pub fn permits(&self, percent: f64) -> bool {
        self.allow_below_50 || percent >= SUB_50_CUTOFF
    }
}

/// Tier boundaries, multiplier curves and per-metric overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    /// Strictly descending, terminating at 0
    #[serde(default = "default_boundaries")]
    pub boundaries: Vec<f64>,

    #[serde(default = "default_multipliers")]
    pub default_multipliers: MultiplierMap,

    #[serde(default = "alternate_multipliers")]
    pub alternate_multipliers: MultiplierMap,

    /// Metrics not listed resolve to the default map without sub-50 scoring
    #[serde(default = "default_overrides")]
    pub overrides: BTreeMap<String, MetricRule>,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            boundaries: default_boundaries(),
            default_multipliers: default_multipliers(),
            alternate_multipliers: alternate_multipliers(),
            overrides: default_overrides(),
        }
    }
}

impl ThresholdTable {
    /// Resolve the rule for a metric, falling back to `{default, false}`
    pub fn resolve_rule(&self, metric_id: &str) -> ResolvedRule<'_> {
        let rule = self.overrides.get(metric_id).copied().unwrap_or_default();
        ResolvedRule {
            kind: rule.multipliers,
            multipliers: self.multiplier_map(rule.multipliers),
            allow_below_50: rule.allow_below_50,
        }
    }

    pub fn multiplier_map(&self, kind: MultiplierMapKind) -> &MultiplierMap {
        match kind {
            MultiplierMapKind::Default => &self.default_multipliers,
            MultiplierMapKind::Alternate => &self.alternate_multipliers,
        }
    }

    /// Highest boundary that is `<= percent`.
    ///
    /// Boundaries are descending, so the first index whose boundary no longer
    /// exceeds `percent` is the same tier a first-match linear scan would pick.
    pub fn tier_for(&self, percent: f64) -> Option<f64> {
        if percent.is_nan() {
            return None;
        }
        let idx = self.boundaries.partition_point(|&boundary| boundary > percent);
        self.boundaries.get(idx).copied()
    }

    /// Lowest boundary strictly above `percent` that the gate permits
    pub fn next_boundary_above(&self, percent: f64, allow_below_50: bool) -> Option<f64> {
        self.boundaries
            .iter()
            .rev()
            .copied()
            .filter(|&boundary| allow_below_50 || boundary >= SUB_50_CUTOFF)
            .find(|&boundary| boundary > percent)
    }
}

fn default_boundaries() -> Vec<f64> {
    vec![
        125.0, 100.0, 90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 20.0, 0.0,
    ]
}

fn default_multipliers() -> MultiplierMap {
    MultiplierMap::from_pairs(&[
        (125.0, 1.0),
        (100.0, 1.0),
        (90.0, 0.9),
        (80.0, 0.8),
        (70.0, 0.7),
        (60.0, 0.6),
        (50.0, 0.5),
        (40.0, 0.4),
        (30.0, 0.3),
        (20.0, 0.2),
        (0.0, 0.0),
    ])
}

// 5-point metrics reach full credit at 80%
fn alternate_multipliers() -> MultiplierMap {
    MultiplierMap::from_pairs(&[
        (125.0, 1.0),
        (100.0, 1.0),
        (90.0, 1.0),
        (80.0, 1.0),
        (70.0, 0.8),
        (60.0, 0.6),
        (50.0, 0.4),
        (40.0, 0.2),
        (30.0, 0.0),
        (20.0, 0.0),
        (0.0, 0.0),
    ])
}

fn default_overrides() -> BTreeMap<String, MetricRule> {
    [
        "protection_pct",
        "rate_plan_pct",
        "next_up_pct",
        "event_opps_pct",
        "plus1_pct",
        "csat_pct",
    ]
    .into_iter()
    .map(|metric| {
        (
            metric.to_string(),
            MetricRule {
                multipliers: MultiplierMapKind::Alternate,
                allow_below_50: false,
            },
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_for_picks_highest_boundary_not_above_percent() {
        let table = ThresholdTable::default();
        assert_eq!(table.tier_for(83.0), Some(80.0));
        assert_eq!(table.tier_for(80.0), Some(80.0));
        assert_eq!(table.tier_for(79.99), Some(70.0));
        assert_eq!(table.tier_for(300.0), Some(125.0));
        assert_eq!(table.tier_for(0.0), Some(0.0));
    }

    #[test]
    fn tier_for_below_floor_or_nan_has_no_tier() {
        let table = ThresholdTable::default();
        assert_eq!(table.tier_for(-5.0), None);
        assert_eq!(table.tier_for(f64::NAN), None);
    }

    #[test]
    fn tier_for_matches_linear_scan() {
        let table = ThresholdTable::default();
        for tenth in -10..=1400 {
            let percent = f64::from(tenth) / 10.0;
            let linear = table.boundaries.iter().copied().find(|&b| percent >= b);
            assert_eq!(table.tier_for(percent), linear, "percent {}", percent);
        }
    }

    #[test]
    fn unlisted_metric_resolves_to_default_rule() {
        let table = ThresholdTable::default();
        let rule = table.resolve_rule("opps_pct");
        assert_eq!(rule.kind, MultiplierMapKind::Default);
        assert!(!rule.allow_below_50);
        assert_eq!(rule.multipliers.get(90.0), Some(0.9));
    }

    #[test]
    fn five_point_metric_resolves_to_alternate_rule() {
        let table = ThresholdTable::default();
        let rule = table.resolve_rule("csat_pct");
        assert_eq!(rule.kind, MultiplierMapKind::Alternate);
        assert_eq!(rule.multipliers.get(80.0), Some(1.0));
    }

    #[test]
    fn next_boundary_skips_sub_50_unless_allowed() {
        let table = ThresholdTable::default();
        assert_eq!(table.next_boundary_above(25.0, false), Some(50.0));
        assert_eq!(table.next_boundary_above(25.0, true), Some(30.0));
        assert_eq!(table.next_boundary_above(83.0, false), Some(90.0));
        assert_eq!(table.next_boundary_above(90.0, false), Some(100.0));
        assert_eq!(table.next_boundary_above(125.0, false), None);
    }

    #[test]
    fn permits_respects_gate() {
        let table = ThresholdTable::default();
        let rule = table.resolve_rule("ppvga_pct");
        assert!(!rule.permits(49.9));
        assert!(rule.permits(50.0));
    }
}
