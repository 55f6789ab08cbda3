use anyhow::Result;
use serde::Serialize;

use crate::records::{MetricReading, Record};
use crate::scoring::PointsResult;

/// A record together with its score, as written by `--format json`
#[derive(Debug, Serialize)]
pub struct ScoredRecord<'a> {
    pub date: &'a str,
    pub readings: &'a [MetricReading],
    pub points: &'a PointsResult,
    pub total_points: f64,
    pub power_rank: f64,
    pub errors: Vec<String>,
}

impl<'a> ScoredRecord<'a> {
    pub fn new(record: &'a Record, points: &'a PointsResult) -> Self {
        Self {
            date: record.period(),
            readings: record.readings(),
            points,
            total_points: points.total_points(),
            power_rank: points.power_rank(),
            errors: record.issues().iter().map(ToString::to_string).collect(),
        }
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
