use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::formatting::{formatter_for, FormattingConfig};
use crate::io;
use crate::output::{self, OutputFormat};
use crate::recommendation::{build_plan, PeriodPosition};

pub struct PlanConfig {
    pub goals: PathBuf,
    pub current: PathBuf,
    pub target_index: f64,
    pub day: Option<i64>,
    pub days_in_period: Option<i64>,
    pub date: Option<NaiveDate>,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub formatting: FormattingConfig,
}

/// Period position from either `--day/--days-in-period` or `--date`
pub fn period_from_args(
    day: Option<i64>,
    days_in_period: Option<i64>,
    date: Option<NaiveDate>,
) -> Result<PeriodPosition> {
    match (day, days_in_period, date) {
        (Some(day), Some(days), None) => Ok(PeriodPosition::new(day, days)),
        (None, None, Some(date)) => Ok(PeriodPosition::for_month_of(date)),
        _ => bail!("Specify either --day with --days-in-period, or --date"),
    }
}

pub fn handle_plan(cmd: PlanConfig) -> Result<()> {
    let period = period_from_args(cmd.day, cmd.days_in_period, cmd.date)?;
    let scoring = super::resolve_config(cmd.config.as_deref())?;
    let goals = io::read_value_map(&cmd.goals)?;
    let current = io::read_value_map(&cmd.current)?;

    for id in goals.keys().chain(current.keys()) {
        if scoring.metric(id).is_none() && id != crate::scoring::adjustment::SECONDARY_INDICATOR {
            log::warn!("Ignoring unknown metric in plan input: {}", id);
        }
    }

    let plan = build_plan(&scoring, &goals, &current, period, cmd.target_index)?;

    let rendered = match cmd.format {
        OutputFormat::Text => output::render_plan(&plan, formatter_for(cmd.formatting).as_ref()),
        OutputFormat::Json => output::to_json(&plan)?,
    };
    io::emit(cmd.output.as_deref(), &rendered)
}
