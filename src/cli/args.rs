use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "powerrank")]
#[command(about = "Tiered metric scoring and Power Rank pacing", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Scoring configuration file (defaults to the nearest .powerrank.toml)
    #[arg(short, long, env = "POWERRANK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score each row of a CSV file and report its Power Rank
    Score {
        /// CSV file with a `date` column and one column per metric
        input: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Recommend which metrics to push to reach a target Power Rank
    Plan {
        /// JSON object of metric id to goal value
        #[arg(long)]
        goals: PathBuf,

        /// JSON object of metric id to current value
        #[arg(long)]
        current: PathBuf,

        /// Power Rank to aim for (0-10)
        #[arg(long = "target-index", visible_alias = "target-rank")]
        target_index: f64,

        /// Day of the period (1-based)
        #[arg(long, requires = "days_in_period", conflicts_with = "date")]
        day: Option<i64>,

        /// Number of days in the period
        #[arg(long = "days-in-period", requires = "day")]
        days_in_period: Option<i64>,

        /// Derive day and period length from a calendar date (monthly period)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Write a default .powerrank.toml in the current directory
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD ({})", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plan_accepts_explicit_period() {
        let cli = Cli::try_parse_from([
            "powerrank",
            "plan",
            "--goals",
            "g.json",
            "--current",
            "c.json",
            "--target-index",
            "8.5",
            "--day",
            "14",
            "--days-in-period",
            "28",
        ])
        .unwrap();
        match cli.command {
            Commands::Plan {
                target_index,
                day,
                days_in_period,
                date,
                ..
            } => {
                assert_eq!(target_index, 8.5);
                assert_eq!(day, Some(14));
                assert_eq!(days_in_period, Some(28));
                assert_eq!(date, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn plan_rejects_day_with_date() {
        let result = Cli::try_parse_from([
            "powerrank",
            "plan",
            "--goals",
            "g.json",
            "--current",
            "c.json",
            "--target-index",
            "8",
            "--day",
            "1",
            "--days-in-period",
            "30",
            "--date",
            "2026-02-14",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn score_parses_json_format() {
        let cli = Cli::try_parse_from(["powerrank", "-v", "score", "in.csv", "--format", "json"])
            .unwrap();
        assert_eq!(cli.verbosity, 1);
        match cli.command {
            Commands::Score { common, .. } => assert_eq!(common.format, OutputFormat::Json),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
