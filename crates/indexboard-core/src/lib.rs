//! # Indexboard Core
//!
//! Domain types, provider adapter, and dashboard controller for the
//! indexboard global index tracker.
//!
//! ## Overview
//!
//! This crate provides the foundational components for indexboard:
//!
//! - **Canonical domain models** for daily OHLCV rows, price history, and
//!   summary snapshots
//! - **Built-in index catalog** mapping the ten supported display names to
//!   their Yahoo symbols
//! - **Provider trait** with a Yahoo adapter covering both the real API and
//!   deterministic offline data
//! - **Dashboard controller** assembling overview, chart, and statistics
//!   into a single renderable outcome
//! - **Response envelope** with request metadata for machine-readable output
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo chart + quoteSummary) |
//! | [`catalog`] | Built-in index catalog |
//! | [`dashboard`] | Render flow and outcome types |
//! | [`domain`] | Domain models (HistoryRow, PriceHistory, SummarySnapshot) |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Validation errors |
//! | [`format`] | Placeholder and thousands-separator formatting |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`provider`] | Provider trait, requests, and classified errors |
//! | [`stats`] | Descriptive statistics over history columns |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use indexboard_core::{
//!     render, DashboardQuery, DateRange, IndexCatalog, RenderOutcome, TradingDate,
//!     YahooIndexClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = IndexCatalog::global();
//!     // Offline transport; swap in ReqwestHttpClient for live data.
//!     let provider = YahooIndexClient::default();
//!     let range = DateRange::new(
//!         TradingDate::parse("2023-01-01")?,
//!         TradingDate::parse("2023-06-30")?,
//!     );
//!     let query = DashboardQuery::new("NIFTY 50", range);
//!
//!     match render(&catalog, &provider, &query).await? {
//!         RenderOutcome::Report(report) => {
//!             println!("{} rows for {}", report.history.len(), report.index_name);
//!         }
//!         RenderOutcome::Empty(notice) => println!("{}", notice.message),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Caller   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ dashboard::render│───▶│ IndexCatalog     │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ QuoteProvider   │────▶│ HttpClient       │
//! │ (Yahoo adapter) │     │ (reqwest/noop)   │
//! └─────────────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Domain Models   │
//! │ (history, stats)│
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Provider failures carry a stable classification:
//!
//! ```rust
//! use indexboard_core::{ProviderError, ProviderErrorKind};
//!
//! fn handle_error(error: ProviderError) {
//!     match error.kind() {
//!         ProviderErrorKind::RateLimited => {
//!             // Back off before the next call
//!         }
//!         ProviderErrorKind::Network => {
//!             // Check connectivity, maybe retry
//!         }
//!         ProviderErrorKind::MalformedResponse => {
//!             // Upstream changed shape; report it
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - No credentials are required; the Yahoo crumb is an anonymous session
//!   token and is never logged
//! - Session cookies stay inside the process-local jar
//! - Input validation on all domain types

pub mod adapters;
pub mod catalog;
pub mod dashboard;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod format;
pub mod http_client;
pub mod provider;
pub mod stats;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::YahooIndexClient;

// Catalog
pub use catalog::{IndexCatalog, IndexEntry};

// Dashboard flow
pub use dashboard::{
    render, ChartPoint, ChartSeries, DashboardError, DashboardQuery, DashboardReport, EmptyNotice,
    RenderOutcome, UNAVAILABLE_WARNING,
};

// Domain models
pub use domain::{
    DateRange, HistoryRow, PriceHistory, SummarySnapshot, Symbol, TradingDate, UtcDateTime,
};

// Envelope types
pub use envelope::{Envelope, EnvelopeMeta};

// Error types
pub use error::ValidationError;

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Provider trait and types
pub use provider::{
    HistoryRequest, ProviderError, ProviderErrorKind, QuoteProvider, SummaryRequest,
};

// Statistics
pub use stats::{describe, ColumnStats};
