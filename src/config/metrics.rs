use serde::{Deserialize, Serialize};

/// A scored metric and the most points it can contribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    /// Identifier as it appears in input columns, e.g. `opps_pct`
    pub id: String,
    pub max_points: f64,
}

impl MetricDefinition {
    pub fn new(id: impl Into<String>, max_points: f64) -> Self {
        Self {
            id: id.into(),
            max_points,
        }
    }

    /// Key under which earned points are reported (`opps_pct` -> `opps_points`)
    pub fn points_key(&self) -> String {
        points_key(&self.id)
    }
}

pub fn points_key(metric_id: &str) -> String {
    match metric_id.strip_suffix("_pct") {
        Some(stem) => format!("{}_points", stem),
        None => format!("{}_points", metric_id),
    }
}

/// Built-in metric set, in report order. Maxima sum to 100.
pub fn default_metrics() -> Vec<MetricDefinition> {
    [
        ("opps_pct", 10.0),
        ("ppvga_pct", 30.0),
        ("internet_pct", 20.0),
        ("accessories_pct", 10.0),
        ("protection_pct", 5.0),
        ("rate_plan_pct", 5.0),
        ("next_up_pct", 5.0),
        ("event_opps_pct", 5.0),
        ("plus1_pct", 5.0),
        ("csat_pct", 5.0),
    ]
    .into_iter()
    .map(|(id, max_points)| MetricDefinition::new(id, max_points))
    .collect()
}
