use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Whole units still needed today to be on a linear pace for `target_percent`.
///
/// `day_of_period` is not range-checked: days outside `1..=days_in_period`
/// extrapolate the same line.
pub fn estimate_progress_needed(
    current_value: f64,
    goal_value: f64,
    day_of_period: i64,
    days_in_period: i64,
    target_percent: f64,
) -> Result<u64> {
    if days_in_period <= 0 {
        return Err(Error::invalid_argument(format!(
            "days_in_period must be greater than zero (got {})",
            days_in_period
        )));
    }

    let daily_target = goal_value / days_in_period as f64;
    let expected_by_today = daily_target * day_of_period as f64 * (target_percent / 100.0);
    let shortfall = (expected_by_today - current_value).ceil();

    // NaN and non-positive shortfalls both mean "on pace"
    if shortfall > 0.0 {
        Ok(shortfall as u64)
    } else {
        Ok(0)
    }
}

/// Where "today" falls inside the scoring period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPosition {
    pub day_of_period: i64,
    pub days_in_period: i64,
}

impl PeriodPosition {
    pub fn new(day_of_period: i64, days_in_period: i64) -> Self {
        Self {
            day_of_period,
            days_in_period,
        }
    }

    /// Monthly period containing `date`
    pub fn for_month_of(date: NaiveDate) -> Self {
        Self {
            day_of_period: i64::from(date.day()),
            days_in_period: days_in_month(date.year(), date.month()),
        }
    }
}

fn days_in_month(year: i32, month: u32) -> i64 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days(),
        // Only reachable at the edge of chrono's supported range
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_on_pace_needs_nothing() {
        assert_eq!(estimate_progress_needed(40.0, 100.0, 14, 28, 80.0).unwrap(), 0);
    }

    #[test]
    fn behind_pace_rounds_up() {
        // 100 / 28 * 14 = 50 expected at 100%
        assert_eq!(estimate_progress_needed(40.0, 100.0, 14, 28, 100.0).unwrap(), 10);
        assert_eq!(estimate_progress_needed(49.5, 100.0, 14, 28, 100.0).unwrap(), 1);
    }

    #[test]
    fn ahead_of_pace_is_zero() {
        assert_eq!(estimate_progress_needed(90.0, 100.0, 14, 28, 125.0).unwrap(), 0);
    }

    #[test]
    fn zero_days_is_invalid_argument() {
        let err = estimate_progress_needed(0.0, 100.0, 1, 0, 100.0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(estimate_progress_needed(0.0, 100.0, 1, -3, 100.0).is_err());
    }

    #[test]
    fn day_beyond_period_extrapolates() {
        // 10 per day, day 40 of 30 at 100% expects 400
        assert_eq!(estimate_progress_needed(100.0, 300.0, 40, 30, 100.0).unwrap(), 300);
    }

    #[test]
    fn period_position_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        assert_eq!(PeriodPosition::for_month_of(date), PeriodPosition::new(14, 29));
        let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        assert_eq!(PeriodPosition::for_month_of(date), PeriodPosition::new(31, 31));
    }
}
