//! # Offline Dashboard Example
//!
//! Renders a full dashboard for one index without touching the network,
//! using the deterministic offline data served by the default client.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example offline_dashboard
//! ```
//!
//! ## What it demonstrates
//!
//! - Resolving an index name against the built-in catalog
//! - Driving `render` with an offline provider
//! - Walking the report: history, chart points, and statistics

use indexboard_core::{
    render, DashboardQuery, DateRange, IndexCatalog, RenderOutcome, TradingDate, YahooIndexClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = IndexCatalog::global();
    let provider = YahooIndexClient::default();

    let range = DateRange::new(
        TradingDate::parse("2023-01-02")?,
        TradingDate::parse("2023-03-31")?,
    );
    let query = DashboardQuery::new("NIFTY 50", range);

    match render(&catalog, &provider, &query).await? {
        RenderOutcome::Report(report) => {
            println!(
                "{} ({}) over {}..{}",
                report.index_name, report.symbol, report.range.start, report.range.end
            );
            println!("sessions: {}", report.history.len());
            println!("chart points: {}", report.chart.points.len());

            if let Some(close) = report.stats.iter().find(|column| column.column == "close") {
                println!(
                    "close: count={} mean={:?} min={:?} max={:?}",
                    close.count, close.mean, close.min, close.max
                );
            }
        }
        RenderOutcome::Empty(notice) => {
            println!("{}", notice.message);
        }
    }

    Ok(())
}
