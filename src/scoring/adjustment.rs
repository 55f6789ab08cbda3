//! Cross-metric adjustment: a weak handset-protection attach rate (HTP)
//! halves the points earned on the protection metric.
//!
//! The indicator, the cutoff and the target metric are fixed and not read from
//! configuration.

use super::MetricPoints;
use super::round_score;
use crate::records::Record;

/// Secondary, non-scored indicator read alongside the metrics
pub const SECONDARY_INDICATOR: &str = "htp_pct";

/// Metric whose points the indicator gates
pub const ADJUSTED_METRIC: &str = "protection_pct";

/// Indicator values strictly below this halve the adjusted metric
pub const HTP_CUTOFF: f64 = 6.5;

/// Whether the record's indicator reading triggers the discount
pub fn applies(record: &Record) -> bool {
    matches!(record.value(SECONDARY_INDICATOR), Some(htp) if htp < HTP_CUTOFF)
}

/// Halve the adjusted metric's already-scored points. Returns whether it fired.
pub(super) fn apply(record: &Record, entries: &mut [MetricPoints]) -> bool {
    if !applies(record) {
        return false;
    }

    match entries.iter_mut().find(|entry| entry.metric == ADJUSTED_METRIC) {
        Some(entry) => {
            let halved = round_score(entry.points / 2.0);
            log::debug!(
                "{} below {}: {} {} -> {}",
                SECONDARY_INDICATOR,
                HTP_CUTOFF,
                entry.points_key,
                entry.points,
                halved
            );
            entry.points = halved;
            true
        }
        None => false,
    }
}
