use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

use crate::config::ScoringConfig;
use crate::formatting::OutputFormatter;
use crate::recommendation::Plan;
use crate::records::Record;
use crate::scoring::PointsResult;

/// Human-readable summary of one scored record
pub fn render_record_report(
    record: &Record,
    points: &PointsResult,
    config: &ScoringConfig,
    fmt: &dyn OutputFormatter,
) -> String {
    let mut lines = vec![
        fmt.header(&format!("Date: {}", record.period())),
        "Metric Summary:".to_string(),
    ];

    for metric in &config.metrics {
        let percent = match record.value(&metric.id) {
            Some(value) => format!("{:.2}%", value),
            None => "n/a".to_string(),
        };
        let earned = points.points(&metric.id).unwrap_or(0.0);
        lines.push(format!("- {}: {} -> {:.2} pts", metric.id, percent, earned));
    }

    if record.has_issues() {
        lines.push(fmt.warning("Errors:"));
        lines.extend(record.issues().iter().map(|issue| format!("- {}", issue)));
    }

    lines.push(format!("Total Points: {:.2}", points.total_points()));
    lines.push(fmt.bold(&format!("Power Rank: {:.2}", points.power_rank())));
    lines.join("\n")
}

/// Plan header followed by a table of ranked recommendations
pub fn render_plan(plan: &Plan, fmt: &dyn OutputFormatter) -> String {
    let mut lines = vec![
        fmt.header(&format!("Target Power Rank: {:.2}", plan.target_rank)),
        format!("Target Points: {:.2}", plan.target_points),
        format!("Current Points: {:.2}", plan.current_points),
        format!("Shortfall: {:.2}", plan.shortfall_points),
    ];

    if plan.recommendations.is_empty() {
        lines.push("No tier improvements available.".to_string());
        return lines.join("\n");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Metric",
            "Current %",
            "Next Tier",
            "Point Gain",
            "Needed Today",
        ]);

    for rec in &plan.recommendations {
        table.add_row(vec![
            Cell::new(&rec.metric),
            Cell::new(format!("{:.2}", rec.current_percent)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{}", rec.next_threshold)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", rec.point_gain)).set_alignment(CellAlignment::Right),
            Cell::new(rec.needed_more_by_today).set_alignment(CellAlignment::Right),
        ]);
    }

    lines.push(table.to_string());
    lines.push(format!("Potential Gain: {:.2}", plan.potential_gain()));
    lines.join("\n")
}
