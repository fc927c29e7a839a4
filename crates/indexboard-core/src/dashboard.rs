//! Dashboard controller.
//!
//! [`render`] drives the whole flow behind one dashboard view: resolve the
//! index against the catalog, fetch history and summary from the provider,
//! filter the history to the requested instrument, and assemble either a
//! full report or the empty-window notice. The function is pure with respect
//! to presentation; callers decide how a [`RenderOutcome`] reaches the
//! screen.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::IndexCatalog;
use crate::provider::{HistoryRequest, ProviderError, QuoteProvider, SummaryRequest};
use crate::stats::{describe, ColumnStats};
use crate::{DateRange, PriceHistory, SummarySnapshot, Symbol, TradingDate, ValidationError};

/// Warning shown when the requested window produced no usable rows.
pub const UNAVAILABLE_WARNING: &str =
    "Unable to fetch data. Try a different index or check your network.";

/// One dashboard request: a catalog index name plus the date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    pub index_name: String,
    pub range: DateRange,
}

impl DashboardQuery {
    pub fn new(index_name: impl Into<String>, range: DateRange) -> Self {
        Self {
            index_name: index_name.into(),
            range,
        }
    }
}

/// Close-price series in chart order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: TradingDate,
    pub close: f64,
}

impl ChartSeries {
    fn from_history(history: &PriceHistory) -> Self {
        let points = history
            .rows
            .iter()
            .map(|row| ChartPoint {
                date: row.date,
                close: row.close,
            })
            .collect();
        Self { points }
    }
}

/// Fully assembled dashboard view for a non-empty window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub index_name: String,
    pub symbol: Symbol,
    pub range: DateRange,
    pub summary: SummarySnapshot,
    pub history: PriceHistory,
    pub chart: ChartSeries,
    pub stats: Vec<ColumnStats>,
    /// Degradations that did not abort the render, e.g. a summary fetch
    /// failure leaving the overview on placeholders.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Notice shown instead of a report when the window holds no rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyNotice {
    pub index_name: String,
    pub symbol: Symbol,
    pub message: String,
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RenderOutcome {
    Report(DashboardReport),
    Empty(EmptyNotice),
}

impl RenderOutcome {
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Report(report) => &report.warnings,
            Self::Empty(_) => &[],
        }
    }
}

/// Failures that abort a render.
///
/// A failed summary fetch is deliberately absent: it degrades the report to
/// placeholder overview fields instead of aborting, because the chart and
/// statistics remain fully renderable without it.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Catalog(#[from] ValidationError),
    #[error("history fetch failed: {0}")]
    History(#[from] ProviderError),
}

/// Render one dashboard view.
///
/// The history fetch is load-bearing and its failure aborts the render. An
/// empty history (after filtering to the requested symbol) short-circuits
/// into [`RenderOutcome::Empty`] without touching the summary endpoint.
pub async fn render(
    catalog: &IndexCatalog,
    provider: &dyn QuoteProvider,
    query: &DashboardQuery,
) -> Result<RenderOutcome, DashboardError> {
    let entry = catalog.resolve(&query.index_name)?;
    let symbol = entry.symbol.clone();

    let mut history = provider
        .history(HistoryRequest::new(symbol.clone(), query.range))
        .await?;
    history.retain_symbol(&symbol);

    if !history.is_usable() {
        log::info!(
            "no usable history for {} ({symbol}) between {} and {}",
            entry.name,
            query.range.start,
            query.range.end
        );
        return Ok(RenderOutcome::Empty(EmptyNotice {
            index_name: entry.name.clone(),
            symbol,
            message: UNAVAILABLE_WARNING.to_owned(),
        }));
    }

    let mut warnings = Vec::new();
    let summary = match provider.summary(SummaryRequest::new(symbol.clone())).await {
        Ok(snapshot) => snapshot,
        Err(error) => {
            log::warn!("summary fetch failed for {symbol}: {error}");
            warnings.push(format!(
                "summary unavailable for {symbol}: {error}; overview shows placeholders"
            ));
            SummarySnapshot::empty(symbol.clone())
        }
    };

    let chart = ChartSeries::from_history(&history);
    let stats = describe(&history);

    Ok(RenderOutcome::Report(DashboardReport {
        index_name: entry.name.clone(),
        symbol,
        range: query.range,
        summary,
        history,
        chart,
        stats,
        warnings,
    }))
}
