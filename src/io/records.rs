//! CSV ingestion into [`Record`]s.
//!
//! Every configured metric column, plus the secondary `htp_pct` indicator,
//! is read per row. Empty or unparseable cells become absent readings with a
//! [`DataQualityIssue`] attached; they never abort the row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::config::ScoringConfig;
use crate::errors::{Error, Result, ResultExt};
use crate::records::{DataQualityIssue, MetricReading, Record};
use crate::scoring::adjustment::SECONDARY_INDICATOR;

const DATE_COLUMN: &str = "date";

/// Read records from any CSV source with a header row
pub fn read_records<R: Read>(source: R, config: &ScoringConfig) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let record = build_record(&headers, &row, config);
        if record.has_issues() {
            log::debug!(
                "Row {} ({}) has {} data issue(s)",
                index + 1,
                record.period(),
                record.issues().len()
            );
        }
        records.push(record);
    }
    Ok(records)
}

pub fn read_records_from_path(path: &Path, config: &ScoringConfig) -> Result<Vec<Record>> {
    let file = File::open(path)
        .map_err(Error::from)
        .context(format!("Failed to open {}", path.display()))?;
    read_records(file, config).context(format!("Failed to read {}", path.display()))
}

fn build_record(headers: &StringRecord, row: &StringRecord, config: &ScoringConfig) -> Record {
    let mut issues = Vec::new();

    let period = cell(headers, row, DATE_COLUMN).unwrap_or_default().to_string();
    if period.is_empty() {
        issues.push(DataQualityIssue::MissingDate);
    }

    let fields = config
        .metrics
        .iter()
        .map(|metric| metric.id.as_str())
        .chain(std::iter::once(SECONDARY_INDICATOR));

    let readings = fields
        .map(|field| {
            let value = parse_number(field, cell(headers, row, field), &mut issues);
            MetricReading::new(field, value)
        })
        .collect();

    Record::new(readings, period, issues)
}

fn cell<'r>(headers: &StringRecord, row: &'r StringRecord, column: &str) -> Option<&'r str> {
    headers
        .iter()
        .position(|header| header == column)
        .and_then(|idx| row.get(idx))
}

fn parse_number(
    field: &str,
    raw: Option<&str>,
    issues: &mut Vec<DataQualityIssue>,
) -> Option<f64> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            issues.push(DataQualityIssue::Missing {
                field: field.to_string(),
            });
            return None;
        }
    };

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            issues.push(DataQualityIssue::Invalid {
                field: field.to_string(),
                raw: raw.to_string(),
            });
            None
        }
    }
}
