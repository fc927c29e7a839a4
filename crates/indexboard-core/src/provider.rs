//! Quote provider trait and request types.
//!
//! This module defines the adapter contract (`QuoteProvider`) the dashboard
//! renders against, along with the request payloads for its two endpoints.
//!
//! # Endpoints
//!
//! | Endpoint | Request | Response | Description |
//! |----------|---------|----------|-------------|
//! | History | [`HistoryRequest`] | [`PriceHistory`] | Daily OHLCV over a date window |
//! | Summary | [`SummaryRequest`] | [`SummarySnapshot`] | Current-market summary fields |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{DateRange, PriceHistory, SummarySnapshot, Symbol};

/// Provider failure classification.
///
/// The dashboard never sees a raw transport or parse panic; every upstream
/// failure arrives as one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    Network,
    MalformedResponse,
    RateLimited,
    Upstream,
    InvalidRequest,
}

/// Structured provider error with a stable machine code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
    retryable: bool,
}

impl ProviderError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Network,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::MalformedResponse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Upstream,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::Network => "provider.network",
            ProviderErrorKind::MalformedResponse => "provider.malformed_response",
            ProviderErrorKind::RateLimited => "provider.rate_limited",
            ProviderErrorKind::Upstream => "provider.upstream",
            ProviderErrorKind::InvalidRequest => "provider.invalid_request",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

/// Request payload for the history endpoint.
///
/// The range travels to the provider exactly as the caller supplied it,
/// inverted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub range: DateRange,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, range: DateRange) -> Self {
        Self { symbol, range }
    }
}

/// Request payload for the summary endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub symbol: Symbol,
}

impl SummaryRequest {
    pub fn new(symbol: Symbol) -> Self {
        Self { symbol }
    }
}

/// Provider adapter contract.
///
/// Implementations must be `Send + Sync`; the methods return boxed futures
/// so the trait stays object safe behind `&dyn QuoteProvider`.
pub trait QuoteProvider: Send + Sync {
    /// Stable provider identifier used in envelopes and warnings.
    fn id(&self) -> &'static str;

    /// Fetch daily OHLCV history for the requested window.
    ///
    /// An empty series is a valid answer (no data in the window); hard
    /// failures surface as classified [`ProviderError`]s.
    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, ProviderError>> + Send + 'a>>;

    /// Fetch the current summary snapshot.
    ///
    /// Fields the provider omits come back as `None`, never as errors.
    fn summary<'a>(
        &'a self,
        req: SummaryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SummarySnapshot, ProviderError>> + Send + 'a>>;
}
