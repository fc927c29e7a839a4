use serde::{Deserialize, Serialize};

use crate::{Symbol, TradingDate, UtcDateTime, ValidationError};

/// One daily OHLCV observation as returned by the history endpoint.
///
/// `symbol` is carried per row because providers answer multi-instrument
/// requests with a single flat table; the dashboard filters on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
    pub adj_close: Option<f64>,
    pub symbol: Symbol,
}

impl HistoryRow {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
        adj_close: Option<f64>,
        symbol: Symbol,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;
        validate_optional_non_negative("adj_close", adj_close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            adj_close,
            symbol,
        })
    }
}

/// Ordered daily history for one requested instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub symbol: Symbol,
    pub rows: Vec<HistoryRow>,
}

impl PriceHistory {
    pub fn new(symbol: Symbol, rows: Vec<HistoryRow>) -> Self {
        Self { symbol, rows }
    }

    pub fn empty(symbol: Symbol) -> Self {
        Self::new(symbol, Vec::new())
    }

    /// Whether there is anything to render.
    pub fn is_usable(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop rows that belong to a different instrument.
    ///
    /// Guards against providers answering with a bundle wider than the
    /// request.
    pub fn retain_symbol(&mut self, symbol: &Symbol) {
        self.rows.retain(|row| &row.symbol == symbol);
    }
}

/// Current-market snapshot from the provider's summary-detail block.
///
/// Every field is optional; indices routinely omit `market_cap` and thin
/// instruments omit more. Missing fields render as placeholders, never as
/// errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySnapshot {
    pub symbol: Symbol,
    pub previous_close: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub volume: Option<u64>,
    pub market_cap: Option<f64>,
    pub as_of: UtcDateTime,
}

impl SummarySnapshot {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: Symbol,
        previous_close: Option<f64>,
        fifty_two_week_high: Option<f64>,
        fifty_two_week_low: Option<f64>,
        volume: Option<u64>,
        market_cap: Option<f64>,
        as_of: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        validate_optional_non_negative("previous_close", previous_close)?;
        validate_optional_non_negative("fifty_two_week_high", fifty_two_week_high)?;
        validate_optional_non_negative("fifty_two_week_low", fifty_two_week_low)?;
        validate_optional_non_negative("market_cap", market_cap)?;

        Ok(Self {
            symbol,
            previous_close,
            fifty_two_week_high,
            fifty_two_week_low,
            volume,
            market_cap,
            as_of,
        })
    }

    /// All-placeholder snapshot used when the summary fetch degrades.
    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            previous_close: None,
            fifty_two_week_high: None,
            fifty_two_week_low: None,
            volume: None,
            market_cap: None,
            as_of: UtcDateTime::now(),
        }
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        validate_non_negative(field, value)?;
    }
    Ok(())
}
