//! Behavior-driven tests for dashboard rendering journeys
//!
//! These tests verify WHAT a user can accomplish with an indexboard
//! dashboard, focusing on observable outcomes rather than implementation
//! details.

use std::future::Future;
use std::pin::Pin;

use indexboard_core::{
    render, DashboardError, DashboardQuery, DateRange, HistoryRequest, HistoryRow, IndexCatalog,
    PriceHistory, ProviderError, QuoteProvider, RenderOutcome, SummaryRequest, SummarySnapshot,
    Symbol, TradingDate, UtcDateTime, ValidationError, YahooIndexClient,
};

// =============================================================================
// Test doubles and helpers
// =============================================================================

/// Provider stub with scripted answers for both endpoints.
struct ScriptedProvider {
    history: Result<PriceHistory, ProviderError>,
    summary: Result<SummarySnapshot, ProviderError>,
}

impl QuoteProvider for ScriptedProvider {
    fn id(&self) -> &'static str {
        "scripted"
    }

    fn history<'a>(
        &'a self,
        _req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, ProviderError>> + Send + 'a>> {
        let response = self.history.clone();
        Box::pin(async move { response })
    }

    fn summary<'a>(
        &'a self,
        _req: SummaryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SummarySnapshot, ProviderError>> + Send + 'a>> {
        let response = self.summary.clone();
        Box::pin(async move { response })
    }
}

fn date(raw: &str) -> TradingDate {
    TradingDate::parse(raw).expect("valid date")
}

fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end))
}

fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

fn row(instrument: &Symbol, day: &str, close: f64) -> HistoryRow {
    HistoryRow::new(
        date(day),
        close,
        close + 1.0,
        close - 1.0,
        close,
        Some(1_000_000),
        Some(close),
        instrument.clone(),
    )
    .expect("valid row")
}

fn plain_summary(instrument: &Symbol) -> SummarySnapshot {
    SummarySnapshot::new(
        instrument.clone(),
        Some(100.0),
        Some(120.0),
        Some(80.0),
        Some(5_000_000),
        Some(1_000_000_000.0),
        UtcDateTime::now(),
    )
    .expect("valid snapshot")
}

// =============================================================================
// Dashboard User Journey: Rendering an Index
// =============================================================================

#[tokio::test]
async fn user_can_render_the_default_index_without_a_network() {
    // Given: The built-in catalog and the offline Yahoo client
    let catalog = IndexCatalog::global();
    let provider = YahooIndexClient::default();
    let query = DashboardQuery::new("NIFTY 50", range("2023-01-01", "2023-01-31"));

    // When: They render the dashboard
    let outcome = render(&catalog, &provider, &query)
        .await
        .expect("offline render should succeed");

    // Then: They receive a full report for the NIFTY 50 symbol
    let report = match outcome {
        RenderOutcome::Report(report) => report,
        RenderOutcome::Empty(notice) => panic!("expected report, got notice: {}", notice.message),
    };

    assert_eq!(report.index_name, "NIFTY 50");
    assert_eq!(report.symbol.as_str(), "^NSEI");
    assert!(!report.history.is_empty(), "window should contain sessions");

    // And: Chart and statistics cover the same history
    assert_eq!(report.chart.points.len(), report.history.len());
    assert_eq!(report.stats.len(), 6, "one stats column per numeric series");

    // And: The overview has data to show
    assert!(report.summary.previous_close.is_some());
    assert!(report.warnings.is_empty(), "nothing degraded");
}

#[tokio::test]
async fn sp500_early_january_window_covers_exactly_the_business_days() {
    // Given: The S&P 500 over 2023-01-01 (a Sunday) through 2023-01-10
    let catalog = IndexCatalog::global();
    let provider = YahooIndexClient::default();
    let query = DashboardQuery::new("S&P 500", range("2023-01-01", "2023-01-10"));

    // When: They render the dashboard
    let outcome = render(&catalog, &provider, &query)
        .await
        .expect("offline render should succeed");

    // Then: The history holds the seven business days, endpoints included
    let report = match outcome {
        RenderOutcome::Report(report) => report,
        RenderOutcome::Empty(notice) => panic!("expected report, got notice: {}", notice.message),
    };

    assert_eq!(report.history.len(), 7);
    assert_eq!(report.history.rows[0].date, date("2023-01-02"));
    assert_eq!(report.history.rows[6].date, date("2023-01-10"));

    // And: Dates increase strictly
    for pair in report.history.rows.windows(2) {
        assert!(pair[0].date < pair[1].date, "history must be ordered");
    }

    // And: Chart and close statistics agree on the count
    assert_eq!(report.chart.points.len(), 7);
    let close = report
        .stats
        .iter()
        .find(|column| column.column == "close")
        .expect("close column present");
    assert_eq!(close.count, 7);
}

#[tokio::test]
async fn every_catalog_index_renders_against_its_own_symbol() {
    // Given: All ten built-in indices
    let catalog = IndexCatalog::global();
    let provider = YahooIndexClient::default();

    for entry in catalog.entries() {
        // When: The user renders each of them
        let query = DashboardQuery::new(entry.name.clone(), range("2023-03-01", "2023-03-10"));
        let outcome = render(&catalog, &provider, &query)
            .await
            .expect("offline render should succeed");

        // Then: The report is bound to the catalog symbol
        match outcome {
            RenderOutcome::Report(report) => {
                assert_eq!(report.symbol, entry.symbol, "symbol for {}", entry.name);
                assert!(
                    report.history.rows.iter().all(|r| r.symbol == entry.symbol),
                    "rows for {} must carry its symbol",
                    entry.name
                );
            }
            RenderOutcome::Empty(notice) => {
                panic!("expected report for {}, got: {}", entry.name, notice.message)
            }
        }
    }
}

#[tokio::test]
async fn foreign_symbol_rows_are_dropped_before_rendering() {
    // Given: A provider that answers with a bundle wider than the request
    let catalog = IndexCatalog::global();
    let gspc = symbol("^GSPC");
    let mixed = PriceHistory::new(
        gspc.clone(),
        vec![
            row(&gspc, "2023-01-02", 3850.0),
            row(&symbol("^NSEI"), "2023-01-02", 18100.0),
            row(&gspc, "2023-01-03", 3860.0),
        ],
    );
    let provider = ScriptedProvider {
        history: Ok(mixed),
        summary: Ok(plain_summary(&gspc)),
    };
    let query = DashboardQuery::new("S&P 500", range("2023-01-01", "2023-01-10"));

    // When: The user renders the dashboard
    let outcome = render(&catalog, &provider, &query)
        .await
        .expect("render should succeed");

    // Then: Only the requested instrument's rows remain
    let report = match outcome {
        RenderOutcome::Report(report) => report,
        RenderOutcome::Empty(notice) => panic!("expected report, got notice: {}", notice.message),
    };

    assert_eq!(report.history.len(), 2);
    assert!(report.history.rows.iter().all(|r| r.symbol == gspc));
    assert_eq!(report.chart.points.len(), 2);
}

#[tokio::test]
async fn statistics_in_the_report_match_reference_figures() {
    // Given: A provider returning four known closes
    let catalog = IndexCatalog::global();
    let gspc = symbol("^GSPC");
    let history = PriceHistory::new(
        gspc.clone(),
        vec![
            row(&gspc, "2023-01-02", 1.0),
            row(&gspc, "2023-01-03", 2.0),
            row(&gspc, "2023-01-04", 3.0),
            row(&gspc, "2023-01-05", 4.0),
        ],
    );
    let provider = ScriptedProvider {
        history: Ok(history),
        summary: Ok(plain_summary(&gspc)),
    };
    let query = DashboardQuery::new("S&P 500", range("2023-01-01", "2023-01-10"));

    // When: The user renders the dashboard
    let outcome = render(&catalog, &provider, &query)
        .await
        .expect("render should succeed");

    // Then: The close column shows the textbook eight-figure summary
    let report = match outcome {
        RenderOutcome::Report(report) => report,
        RenderOutcome::Empty(notice) => panic!("expected report, got notice: {}", notice.message),
    };
    let close = report
        .stats
        .iter()
        .find(|column| column.column == "close")
        .expect("close column present");

    assert_eq!(close.count, 4);
    assert_eq!(close.mean, Some(2.5));
    let std = close.std.expect("std defined for four values");
    assert!((std - 1.290_994_448_735_805_6).abs() < 1e-12);
    assert_eq!(close.min, Some(1.0));
    assert_eq!(close.q25, Some(1.75));
    assert_eq!(close.median, Some(2.5));
    assert_eq!(close.q75, Some(3.25));
    assert_eq!(close.max, Some(4.0));
}

// =============================================================================
// Dashboard User Journey: Empty Windows and Failures
// =============================================================================

#[tokio::test]
async fn weekend_only_window_shows_the_unavailable_warning() {
    // Given: A window that contains only Saturday and Sunday
    let catalog = IndexCatalog::global();
    let provider = YahooIndexClient::default();
    let query = DashboardQuery::new("FTSE 100 (UK)", range("2023-01-07", "2023-01-08"));

    // When: The user renders the dashboard
    let outcome = render(&catalog, &provider, &query)
        .await
        .expect("render should succeed");

    // Then: They see the single warning instead of a report
    match outcome {
        RenderOutcome::Empty(notice) => {
            assert_eq!(
                notice.message,
                "Unable to fetch data. Try a different index or check your network."
            );
            assert_eq!(notice.symbol.as_str(), "^FTSE");
        }
        RenderOutcome::Report(_) => panic!("expected the empty-window notice"),
    }
}

#[tokio::test]
async fn inverted_date_range_reports_an_empty_window() {
    // Given: Start after end
    let catalog = IndexCatalog::global();
    let provider = YahooIndexClient::default();
    let query = DashboardQuery::new("NIFTY 50", range("2023-02-10", "2023-02-01"));

    // When: The user renders the dashboard
    let outcome = render(&catalog, &provider, &query)
        .await
        .expect("render should succeed");

    // Then: The dashboard falls back to the warning view
    assert!(matches!(outcome, RenderOutcome::Empty(_)));
}

#[tokio::test]
async fn unknown_index_name_is_rejected_with_a_catalog_error() {
    // Given: A name the catalog does not know
    let catalog = IndexCatalog::global();
    let provider = YahooIndexClient::default();
    let query = DashboardQuery::new("FTSE 999", range("2023-01-01", "2023-01-10"));

    // When: The user attempts to render it
    let error = render(&catalog, &provider, &query)
        .await
        .expect_err("unknown index must fail");

    // Then: The error names the catalog problem, not a provider one
    match error {
        DashboardError::Catalog(ValidationError::UnknownIndex { name }) => {
            assert_eq!(name, "FTSE 999");
        }
        other => panic!("expected unknown-index error, got: {other}"),
    }
}

#[tokio::test]
async fn summary_failure_degrades_the_overview_instead_of_aborting() {
    // Given: History succeeds but the summary endpoint is rate limited
    let catalog = IndexCatalog::global();
    let gspc = symbol("^GSPC");
    let history = PriceHistory::new(
        gspc.clone(),
        vec![
            row(&gspc, "2023-01-02", 3850.0),
            row(&gspc, "2023-01-03", 3860.0),
        ],
    );
    let provider = ScriptedProvider {
        history: Ok(history),
        summary: Err(ProviderError::rate_limited("yahoo rate limited the request")),
    };
    let query = DashboardQuery::new("S&P 500", range("2023-01-01", "2023-01-10"));

    // When: The user renders the dashboard
    let outcome = render(&catalog, &provider, &query)
        .await
        .expect("render should still succeed");

    // Then: The report arrives with placeholders and a warning
    let report = match outcome {
        RenderOutcome::Report(report) => report,
        RenderOutcome::Empty(notice) => panic!("expected report, got notice: {}", notice.message),
    };

    assert_eq!(report.warnings.len(), 1);
    assert!(
        report.warnings[0].contains("summary unavailable"),
        "warning should explain the degradation: {}",
        report.warnings[0]
    );
    assert_eq!(report.summary.previous_close, None);
    assert_eq!(report.summary.market_cap, None);

    // And: Chart and statistics are untouched by the degradation
    assert_eq!(report.chart.points.len(), 2);
    let close = report
        .stats
        .iter()
        .find(|column| column.column == "close")
        .expect("close column present");
    assert_eq!(close.count, 2);
}

#[tokio::test]
async fn history_failure_aborts_the_render_with_a_provider_error() {
    // Given: The history endpoint is unreachable
    let catalog = IndexCatalog::global();
    let provider = ScriptedProvider {
        history: Err(ProviderError::network("dns lookup failed")),
        summary: Ok(plain_summary(&symbol("^GSPC"))),
    };
    let query = DashboardQuery::new("S&P 500", range("2023-01-01", "2023-01-10"));

    // When: The user attempts to render
    let error = render(&catalog, &provider, &query)
        .await
        .expect_err("history failure must abort");

    // Then: The failure carries the provider classification
    match error {
        DashboardError::History(provider_error) => {
            assert_eq!(provider_error.code(), "provider.network");
            assert!(provider_error.retryable());
        }
        other => panic!("expected history error, got: {other}"),
    }
}

// =============================================================================
// Dashboard User Journey: Machine-Readable Output
// =============================================================================

#[tokio::test]
async fn report_serializes_with_an_outcome_tag_for_downstream_consumers() {
    // Given: A successful offline render
    let catalog = IndexCatalog::global();
    let provider = YahooIndexClient::default();
    let query = DashboardQuery::new("Nikkei 225 (Japan)", range("2023-01-02", "2023-01-06"));

    // When: The outcome is serialized for JSON output
    let outcome = render(&catalog, &provider, &query)
        .await
        .expect("offline render should succeed");
    let json = serde_json::to_value(&outcome).expect("outcome serializes");

    // Then: Consumers can dispatch on the outcome tag
    assert_eq!(json["outcome"], "report");
    assert_eq!(json["index_name"], "Nikkei 225 (Japan)");
    assert_eq!(json["symbol"], "^N225");

    // And: Statistics keep their percentage row labels
    let close_stats = json["stats"]
        .as_array()
        .expect("stats is an array")
        .iter()
        .find(|column| column["column"] == "close")
        .expect("close column present");
    assert!(close_stats.get("25%").is_some());
    assert!(close_stats.get("75%").is_some());
}
