// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod output;
pub mod recommendation;
pub mod records;
pub mod scoring;

// Re-export commonly used types
pub use crate::config::{MetricDefinition, ScoringConfig, ThresholdTable};
pub use crate::errors::{Error, Result};
pub use crate::recommendation::{
    build_plan, estimate_progress_needed, PeriodPosition, Plan, Recommendation,
};
pub use crate::records::{DataQualityIssue, MetricReading, Record};
pub use crate::scoring::{score_metric, score_record, total_and_index, MetricPoints, PointsResult};
