//! Input records: one period's metric readings plus any data-quality notes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A metric identifier and its percentage, if one could be read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub metric: String,
    pub value: Option<f64>,
}

impl MetricReading {
    pub fn new(metric: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            metric: metric.into(),
            value,
        }
    }
}

/// Non-fatal problem found while building a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityIssue {
    MissingDate,
    Missing { field: String },
    Invalid { field: String, raw: String },
}

impl fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDate => write!(f, "Missing date value."),
            Self::Missing { field } => write!(f, "Missing value for {}.", field),
            Self::Invalid { field, raw } => write!(f, "Invalid number for {}: '{}'.", field, raw),
        }
    }
}

/// One period of readings. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    readings: Vec<MetricReading>,
    period: String,
    issues: Vec<DataQualityIssue>,
}

impl Record {
    pub fn new(
        readings: Vec<MetricReading>,
        period: impl Into<String>,
        issues: Vec<DataQualityIssue>,
    ) -> Self {
        Self {
            readings,
            period: period.into(),
            issues,
        }
    }

    /// Synthetic record with no period label and no issues
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        let readings = values
            .into_iter()
            .map(|(metric, value)| MetricReading::new(metric.clone(), Some(*value)))
            .collect();
        Self::new(readings, String::new(), Vec::new())
    }

    /// Value for a metric; absent when unread or not present at all
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.readings
            .iter()
            .find(|reading| reading.metric == metric)
            .and_then(|reading| reading.value)
    }

    pub fn readings(&self) -> &[MetricReading] {
        &self.readings
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    pub fn issues(&self) -> &[DataQualityIssue] {
        &self.issues
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

impl From<&BTreeMap<String, f64>> for Record {
    fn from(values: &BTreeMap<String, f64>) -> Self {
        Self::from_values(values)
    }
}
