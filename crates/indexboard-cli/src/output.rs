//! Output rendering for command results.
//!
//! Table mode lays the dashboard out for a terminal: title, overview block,
//! an ASCII close-price chart, and the statistics table. JSON and NDJSON
//! wrap the same payload in the response envelope.

use indexboard_core::format::{self, RUPEE_GLYPH};
use indexboard_core::{ChartSeries, ColumnStats, DashboardReport, RenderOutcome};

use crate::cli::OutputFormat;
use crate::commands::{CommandResult, CommandView, IndexListing};
use crate::error::CliError;

const CHART_HEIGHT: usize = 12;
const CHART_MAX_WIDTH: usize = 72;

pub fn render(
    result: CommandResult,
    output_format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match output_format {
        OutputFormat::Json => {
            let envelope = result.into_envelope()?;
            let payload = if pretty {
                serde_json::to_string_pretty(&envelope)?
            } else {
                serde_json::to_string(&envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Ndjson => {
            let envelope = result.into_envelope()?;
            let payload = serde_json::to_string(&envelope)?;
            println!("{payload}");
        }
        OutputFormat::Table => render_table(&result),
    }

    Ok(())
}

fn render_table(result: &CommandResult) {
    match &result.view {
        CommandView::Dashboard(outcome) => render_dashboard(outcome),
        CommandView::Indices(listings) => render_indices(listings),
    }
}

fn render_dashboard(outcome: &RenderOutcome) {
    println!("🌍 Global Index Tracker");
    println!("Select an index to view live data, historical chart, and summary statistics.");
    println!();

    match outcome {
        RenderOutcome::Empty(notice) => {
            println!("⚠️ {}", notice.message);
        }
        RenderOutcome::Report(report) => {
            for warning in &report.warnings {
                println!("⚠️ {warning}");
            }
            if !report.warnings.is_empty() {
                println!();
            }

            render_overview(report);
            render_chart(&report.chart);
            render_stats(&report.stats);
        }
    }
}

fn render_overview(report: &DashboardReport) {
    let summary = &report.summary;

    println!("🔍 {} Overview", report.index_name);
    println!(
        "- Current Price: {RUPEE_GLYPH}{}",
        format::float_or_na(summary.previous_close)
    );
    println!(
        "- 52 Week High: {RUPEE_GLYPH}{}",
        format::float_or_na(summary.fifty_two_week_high)
    );
    println!(
        "- 52 Week Low: {RUPEE_GLYPH}{}",
        format::float_or_na(summary.fifty_two_week_low)
    );
    println!("- Volume: {}", format::grouped_int_or_na(summary.volume));
    println!(
        "- Market Cap: {RUPEE_GLYPH}{}",
        format::grouped_float_or_na(summary.market_cap)
    );
    println!();
}

fn render_chart(chart: &ChartSeries) {
    println!("📊 Price Chart");

    let points = &chart.points;
    if points.is_empty() {
        println!("  (no sessions in window)");
        println!();
        return;
    }

    let closes: Vec<f64> = points.iter().map(|point| point.close).collect();
    let sampled = sample_columns(&closes, CHART_MAX_WIDTH);
    let min = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    if span == 0.0 {
        println!("{min:>12.2} | {}", "*".repeat(sampled.len()));
    } else {
        for row in 0..CHART_HEIGHT {
            let level = max - span * row as f64 / (CHART_HEIGHT - 1) as f64;
            let line: String = sampled
                .iter()
                .map(|&value| {
                    let bucket =
                        (((max - value) / span) * (CHART_HEIGHT - 1) as f64).round() as usize;
                    if bucket == row {
                        '*'
                    } else {
                        ' '
                    }
                })
                .collect();
            println!("{level:>12.2} | {line}");
        }
    }

    println!("{:>12} +{}", "", "-".repeat(sampled.len()));
    println!(
        "{:>14}{} .. {}  ({} sessions)",
        "",
        points[0].date,
        points[points.len() - 1].date,
        points.len()
    );
    println!();
}

/// Thin a series down to at most `width` columns, keeping both endpoints.
fn sample_columns(values: &[f64], width: usize) -> Vec<f64> {
    if values.len() <= width {
        return values.to_vec();
    }

    (0..width)
        .map(|index| values[index * (values.len() - 1) / (width - 1)])
        .collect()
}

fn render_stats(stats: &[ColumnStats]) {
    println!("📉 Historical Data Summary");

    let header = [
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
    ];
    let rows: Vec<[String; 9]> = stats
        .iter()
        .map(|column| {
            [
                column.column.to_owned(),
                column.count.to_string(),
                stat_cell(column.mean),
                stat_cell(column.std),
                stat_cell(column.min),
                stat_cell(column.q25),
                stat_cell(column.median),
                stat_cell(column.q75),
                stat_cell(column.max),
            ]
        })
        .collect();

    let mut widths: [usize; 9] = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    print_stats_row(&header.map(str::to_owned), &widths);
    for row in &rows {
        print_stats_row(row, &widths);
    }
    println!();
}

fn print_stats_row(cells: &[String; 9], widths: &[usize; 9]) {
    let mut line = String::new();
    for (index, (cell, &width)) in cells.iter().zip(widths.iter()).enumerate() {
        if index == 0 {
            line.push_str(&format!("{cell:<width$}"));
        } else {
            line.push_str(&format!("  {cell:>width$}"));
        }
    }
    println!("{line}");
}

fn stat_cell(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => format::NOT_AVAILABLE.to_owned(),
    }
}

fn render_indices(listings: &[IndexListing]) {
    println!("📋 Available Indices");
    println!();

    let name_width = listings
        .iter()
        .map(|listing| listing.name.len())
        .max()
        .unwrap_or(0);
    for listing in listings {
        let marker = if listing.default { "  (default)" } else { "" };
        println!(
            "  {:<name_width$}  {}{marker}",
            listing.name, listing.symbol
        );
    }
    println!();
    println!(
        "{} indices; pass a name to 'indexboard show'",
        listings.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_keeps_short_series_intact() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(sample_columns(&values, 72), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn sampling_keeps_both_endpoints_of_long_series() {
        let values: Vec<f64> = (0..500).map(f64::from).collect();
        let sampled = sample_columns(&values, 72);

        assert_eq!(sampled.len(), 72);
        assert_eq!(sampled[0], 0.0);
        assert_eq!(sampled[71], 499.0);
    }

    #[test]
    fn stat_cells_render_placeholder_for_undefined_figures() {
        assert_eq!(stat_cell(None), "N/A");
        assert_eq!(stat_cell(Some(1.5)), "1.50");
    }
}
