//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;

use powerrank::{MetricReading, Record};

/// Header plus the sample row from the store's February report
pub const SAMPLE_CSV: &str = "\
date,opps_pct,ppvga_pct,internet_pct,accessories_pct,protection_pct,rate_plan_pct,next_up_pct,event_opps_pct,plus1_pct,csat_pct,htp_pct
2026-02-14,61,35,36,70,83,100,82,40,38,75,5.1
";

pub fn sample_record() -> Record {
    let values = [
        ("opps_pct", 61.0),
        ("ppvga_pct", 35.0),
        ("internet_pct", 36.0),
        ("accessories_pct", 70.0),
        ("protection_pct", 83.0),
        ("rate_plan_pct", 100.0),
        ("next_up_pct", 82.0),
        ("event_opps_pct", 40.0),
        ("plus1_pct", 38.0),
        ("csat_pct", 75.0),
        ("htp_pct", 5.1),
    ];
    Record::new(
        values
            .iter()
            .map(|&(id, value)| MetricReading::new(id, Some(value)))
            .collect(),
        "2026-02-14",
        vec![],
    )
}

pub fn values(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
}
