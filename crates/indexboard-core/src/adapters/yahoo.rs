//! Yahoo Finance adapter.
//!
//! Talks to two unofficial endpoints: the v8 chart API for daily OHLCV
//! history and the v10 quoteSummary API (summaryDetail module) for the
//! current snapshot. quoteSummary requires a crumb token tied to a session
//! cookie; the chart endpoint does not. The crumb is fetched once and cached
//! for the life of the process.
//!
//! With a mock transport the adapter serves deterministic offline data
//! instead of calling upstream, so dashboards render without a network.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::provider::{HistoryRequest, ProviderError, QuoteProvider, SummaryRequest};
use crate::{
    HistoryRow, PriceHistory, SummarySnapshot, Symbol, TradingDate, UtcDateTime, ValidationError,
};

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SUMMARY_BASE_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URLS: [&str; 2] = [
    "https://query1.finance.yahoo.com/v1/test/getcrumb",
    "https://query2.finance.yahoo.com/v1/test/getcrumb",
];
const REFERER: &str = "https://finance.yahoo.com/";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Cached crumb token for the quoteSummary endpoint.
///
/// Yahoo hands out the crumb after a visit to fc.yahoo.com seeds the session
/// cookie. Cookies live in the transport's jar; only the crumb string is
/// cached here, with no expiry. A stale crumb surfaces as an upstream error
/// on the next summary call.
#[derive(Debug, Default)]
struct YahooSession {
    crumb: Mutex<Option<String>>,
}

impl YahooSession {
    fn cached_crumb(&self) -> Option<String> {
        self.crumb.lock().unwrap().clone()
    }

    async fn crumb(
        &self,
        http_client: &Arc<dyn HttpClient>,
        timeout_ms: u64,
    ) -> Result<String, ProviderError> {
        if let Some(crumb) = self.cached_crumb() {
            return Ok(crumb);
        }

        // Step 1: visit fc.yahoo.com so the jar picks up a session cookie.
        // The response body is irrelevant; only the Set-Cookie side effect
        // matters.
        let cookie_request = HttpRequest::get(COOKIE_URL)
            .with_header("referer", REFERER)
            .with_timeout_ms(timeout_ms);
        let _ = http_client.execute(cookie_request).await.map_err(|e| {
            ProviderError::network(format!("failed to reach yahoo cookie host: {}", e.message()))
        })?;

        // Step 2: ask the query hosts for the crumb, falling through to the
        // next host on anything but a rate limit.
        for endpoint in CRUMB_URLS {
            let request = HttpRequest::get(endpoint)
                .with_header("referer", REFERER)
                .with_timeout_ms(timeout_ms);

            match http_client.execute(request).await {
                Ok(response) if response.status == 429 => {
                    return Err(ProviderError::rate_limited(
                        "yahoo rate limited the crumb handshake",
                    ));
                }
                Ok(response) if response.is_success() => {
                    let crumb = response.body.trim().to_owned();
                    // Error pages come back as HTML or JSON; a real crumb is
                    // a short opaque token.
                    if !crumb.is_empty() && crumb.len() <= 64 && !crumb.contains('{') {
                        *self.crumb.lock().unwrap() = Some(crumb.clone());
                        log::debug!("obtained yahoo crumb from {endpoint}");
                        return Ok(crumb);
                    }
                }
                Ok(_) | Err(_) => continue,
            }
        }

        Err(ProviderError::network(
            "could not obtain a yahoo crumb from any endpoint",
        ))
    }
}

/// Yahoo adapter serving both the real API and deterministic offline data.
///
/// The transport decides the mode: a client reporting
/// [`HttpClient::is_mock`] routes every call onto the offline generators.
#[derive(Clone)]
pub struct YahooIndexClient {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
    session: Arc<YahooSession>,
    use_real_api: bool,
}

impl Default for YahooIndexClient {
    fn default() -> Self {
        Self::new(Arc::new(NoopHttpClient))
    }
}

impl YahooIndexClient {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            session: Arc::new(YahooSession::default()),
            use_real_api,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn is_real_client(&self) -> bool {
        self.use_real_api
    }

    /// Execute a GET and classify transport and status failures.
    async fn execute_get(&self, endpoint: &str) -> Result<String, ProviderError> {
        let request = HttpRequest::get(endpoint)
            .with_header("referer", REFERER)
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            ProviderError::network(format!("yahoo transport error: {}", e.message()))
        })?;

        match response.status {
            400 => Err(ProviderError::invalid_request(
                "yahoo rejected the request (status 400)",
            )),
            429 => Err(ProviderError::rate_limited(
                "yahoo rate limited the request (status 429)",
            )),
            _ if !response.is_success() => Err(ProviderError::upstream(format!(
                "yahoo returned status {}",
                response.status
            ))),
            _ => Ok(response.body),
        }
    }
}

impl QuoteProvider for YahooIndexClient {
    fn id(&self) -> &'static str {
        "yahoo"
    }

    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            if self.is_real_client() {
                self.fetch_real_history(&req).await
            } else {
                self.fetch_mock_history(&req).await
            }
        })
    }

    fn summary<'a>(
        &'a self,
        req: SummaryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SummarySnapshot, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            if self.is_real_client() {
                self.fetch_real_summary(&req).await
            } else {
                self.fetch_mock_summary(&req).await
            }
        })
    }
}

// Real API paths
impl YahooIndexClient {
    async fn fetch_real_history(&self, req: &HistoryRequest) -> Result<PriceHistory, ProviderError> {
        // period2 is exclusive upstream, so the inclusive end date maps to
        // the following midnight.
        let endpoint = format!(
            "{}/{}?period1={}&period2={}&interval=1d&events=div%2Csplit",
            CHART_BASE_URL,
            urlencoding::encode(req.symbol.as_str()),
            req.range.start.unix_midnight(),
            req.range.end.unix_next_midnight()
        );
        log::debug!("fetching yahoo chart for {}: {endpoint}", req.symbol);

        let body = self.execute_get(&endpoint).await?;
        parse_chart_body(&body, &req.symbol)
    }

    async fn fetch_real_summary(
        &self,
        req: &SummaryRequest,
    ) -> Result<SummarySnapshot, ProviderError> {
        let crumb = self.session.crumb(&self.http_client, self.timeout_ms).await?;
        let endpoint = format!(
            "{}/{}?modules=summaryDetail&crumb={}",
            SUMMARY_BASE_URL,
            urlencoding::encode(req.symbol.as_str()),
            urlencoding::encode(&crumb)
        );
        // The crumb stays out of the log line.
        log::debug!("fetching yahoo summary for {} (modules=summaryDetail)", req.symbol);

        let body = self.execute_get(&endpoint).await?;
        parse_summary_body(&body, &req.symbol)
    }
}

// Offline paths
impl YahooIndexClient {
    async fn fetch_mock_history(&self, req: &HistoryRequest) -> Result<PriceHistory, ProviderError> {
        self.probe_transport(CHART_BASE_URL).await?;

        let seed = symbol_seed(&req.symbol);
        let mut rows = Vec::new();
        let mut date = req.range.start;
        let mut index = 0_u64;

        // Inclusive walk from start to end, weekends skipped. An inverted
        // range never enters the loop and yields an empty series.
        while date.as_date() <= req.range.end.as_date() {
            if !date.is_weekend() {
                let base = 180.0 + ((seed + index) % 400) as f64 / 10.0;
                let close = base + 0.35;
                let row = HistoryRow::new(
                    date,
                    base,
                    base + 1.40,
                    base - 0.90,
                    close,
                    Some(1_200_000 + index * 40_000),
                    Some(close),
                    req.symbol.clone(),
                )
                .map_err(validation_to_error)?;
                rows.push(row);
                index += 1;
            }

            match date.next_day() {
                Some(next) => date = next,
                None => break,
            }
        }

        Ok(PriceHistory::new(req.symbol.clone(), rows))
    }

    async fn fetch_mock_summary(
        &self,
        req: &SummaryRequest,
    ) -> Result<SummarySnapshot, ProviderError> {
        self.probe_transport(SUMMARY_BASE_URL).await?;

        let seed = symbol_seed(&req.symbol);
        let previous_close = 180.0 + (seed % 400) as f64 / 10.0;
        SummarySnapshot::new(
            req.symbol.clone(),
            Some(previous_close),
            Some(previous_close * 1.18),
            Some(previous_close * 0.82),
            Some(1_500_000 + seed % 900_000),
            Some(2_000_000_000_000.0 + (seed % 250_000) as f64 * 1_000_000.0),
            UtcDateTime::now(),
        )
        .map_err(validation_to_error)
    }

    /// Offline calls still touch the transport once, so a scripted failing
    /// client produces failures on this path too.
    async fn probe_transport(&self, endpoint: &str) -> Result<(), ProviderError> {
        let request = HttpRequest::get(endpoint).with_timeout_ms(self.timeout_ms);
        let response = self.http_client.execute(request).await.map_err(|e| {
            ProviderError::network(format!("yahoo transport error: {}", e.message()))
        })?;

        if !response.is_success() {
            return Err(ProviderError::upstream(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        Ok(())
    }
}

fn parse_chart_body(body: &str, symbol: &Symbol) -> Result<PriceHistory, ProviderError> {
    let response: YahooChartResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::malformed_response(format!("failed to decode yahoo chart payload: {e}"))
    })?;

    // Chart-level errors (unknown symbol, bad window) are not hard failures;
    // they surface as an empty series the dashboard reports as a warning.
    if let Some(error) = &response.chart.error {
        log::warn!("yahoo chart reported an error for {symbol}: {error}");
        return Ok(PriceHistory::empty(symbol.clone()));
    }

    let result = match response.chart.result.as_ref().and_then(|r| r.first()) {
        Some(result) => result,
        None => {
            log::warn!("yahoo chart returned no result for {symbol}");
            return Ok(PriceHistory::empty(symbol.clone()));
        }
    };

    let timestamps = match result.timestamp.as_ref() {
        Some(timestamps) => timestamps,
        None => return Ok(PriceHistory::empty(symbol.clone())),
    };
    let quote = match result.indicators.quote.first() {
        Some(quote) => quote,
        None => return Ok(PriceHistory::empty(symbol.clone())),
    };
    let adjclose = result
        .indicators
        .adjclose
        .as_ref()
        .and_then(|series| series.first());

    let mut rows = Vec::with_capacity(timestamps.len());
    let mut skipped = 0_usize;

    for (index, &unix) in timestamps.iter().enumerate() {
        let ohlc = (
            quote.open.get(index).copied().flatten(),
            quote.high.get(index).copied().flatten(),
            quote.low.get(index).copied().flatten(),
            quote.close.get(index).copied().flatten(),
        );
        let (Some(open), Some(high), Some(low), Some(close)) = ohlc else {
            skipped += 1;
            continue;
        };
        let Some(date) = TradingDate::from_unix_timestamp(unix) else {
            skipped += 1;
            continue;
        };

        let volume = quote
            .volume
            .get(index)
            .copied()
            .flatten()
            .and_then(|v| u64::try_from(v).ok());
        let adj_close = adjclose.and_then(|series| series.adjclose.get(index).copied().flatten());

        match HistoryRow::new(date, open, high, low, close, volume, adj_close, symbol.clone()) {
            Ok(row) => rows.push(row),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("yahoo chart: skipped {skipped} incomplete rows for {symbol}");
    }

    Ok(PriceHistory::new(symbol.clone(), rows))
}

fn parse_summary_body(body: &str, symbol: &Symbol) -> Result<SummarySnapshot, ProviderError> {
    let response: YahooQuoteSummaryResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::malformed_response(format!("failed to decode yahoo summary payload: {e}"))
    })?;

    if let Some(error) = &response.quote_summary.error {
        return Err(ProviderError::upstream(format!(
            "yahoo summary error for {symbol}: {error}"
        )));
    }

    let detail = response
        .quote_summary
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|result| result.summary_detail);

    let Some(detail) = detail else {
        // No summaryDetail module in the answer; every field reads as absent.
        return Ok(SummarySnapshot::empty(symbol.clone()));
    };

    SummarySnapshot::new(
        symbol.clone(),
        detail.previous_close.and_then(YahooRawValue::to_option),
        detail.fifty_two_week_high.and_then(YahooRawValue::to_option),
        detail.fifty_two_week_low.and_then(YahooRawValue::to_option),
        detail.volume.and_then(YahooRawValue::to_volume),
        detail.market_cap.and_then(YahooRawValue::to_option),
        UtcDateTime::now(),
    )
    .map_err(|e| {
        ProviderError::malformed_response(format!("yahoo summary carried invalid fields: {e}"))
    })
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(31).wrapping_add(byte as u64)
    })
}

fn validation_to_error(error: ValidationError) -> ProviderError {
    ProviderError::malformed_response(error.to_string())
}

// Yahoo chart API response structures
#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
    #[serde(default)]
    adjclose: Option<Vec<YahooAdjCloseSeries>>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooAdjCloseSeries {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

// Yahoo quoteSummary API response structures
#[derive(Debug, Clone, Deserialize)]
struct YahooQuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: YahooQuoteSummaryData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooQuoteSummaryData {
    #[serde(default)]
    result: Option<Vec<YahooQuoteSummaryResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooQuoteSummaryResult {
    #[serde(rename = "summaryDetail", default)]
    summary_detail: Option<YahooSummaryDetail>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooSummaryDetail {
    #[serde(rename = "previousClose", default)]
    previous_close: Option<YahooRawValue>,
    #[serde(rename = "fiftyTwoWeekHigh", default)]
    fifty_two_week_high: Option<YahooRawValue>,
    #[serde(rename = "fiftyTwoWeekLow", default)]
    fifty_two_week_low: Option<YahooRawValue>,
    #[serde(default)]
    volume: Option<YahooRawValue>,
    #[serde(rename = "marketCap", default)]
    market_cap: Option<YahooRawValue>,
}

/// Yahoo wraps numeric fields in an object carrying both the raw number and
/// a preformatted display string; only the raw number matters here. Zero is
/// a legitimate value and passes through.
#[derive(Debug, Clone, Copy, Deserialize)]
struct YahooRawValue {
    #[serde(default)]
    raw: Option<f64>,
}

impl YahooRawValue {
    fn to_option(self) -> Option<f64> {
        self.raw.filter(|v| v.is_finite())
    }

    fn to_volume(self) -> Option<u64> {
        self.to_option().filter(|v| *v >= 0.0).map(|v| v as u64)
    }
}
