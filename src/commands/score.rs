use std::path::PathBuf;

use anyhow::Result;

use crate::config::ScoringConfig;
use crate::formatting::{formatter_for, FormattingConfig, OutputFormatter};
use crate::io;
use crate::output::{self, OutputFormat, ScoredRecord};
use crate::records::Record;
use crate::scoring::{score_record, PointsResult};

pub struct ScoreConfig {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub formatting: FormattingConfig,
}

pub fn handle_score(cmd: ScoreConfig) -> Result<()> {
    let scoring = super::resolve_config(cmd.config.as_deref())?;
    let records = io::read_records_from_path(&cmd.input, &scoring)?;
    log::info!("Read {} record(s) from {}", records.len(), cmd.input.display());

    let scored = records
        .iter()
        .map(|record| Ok((record, score_record(&scoring, record)?)))
        .collect::<Result<Vec<_>>>()?;

    let rendered = match cmd.format {
        OutputFormat::Text => {
            render_text(&scored, &scoring, formatter_for(cmd.formatting).as_ref())
        }
        OutputFormat::Json => {
            let documents: Vec<ScoredRecord<'_>> = scored
                .iter()
                .map(|(record, points)| ScoredRecord::new(record, points))
                .collect();
            output::to_json(&documents)?
        }
    };

    io::emit(cmd.output.as_deref(), &rendered)
}

fn render_text(
    scored: &[(&Record, PointsResult)],
    scoring: &ScoringConfig,
    formatter: &dyn OutputFormatter,
) -> String {
    scored
        .iter()
        .map(|(record, points)| output::render_record_report(record, points, scoring, formatter))
        .collect::<Vec<_>>()
        .join("\n\n")
}
