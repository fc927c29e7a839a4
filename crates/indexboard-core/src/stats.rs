//! Descriptive statistics over price history.
//!
//! Produces the familiar eight-figure summary per numeric column: count,
//! mean, sample standard deviation, minimum, the three quartiles, and
//! maximum. Quartiles interpolate linearly between adjacent order
//! statistics.

use serde::Serialize;

use crate::{HistoryRow, PriceHistory};

/// Summary of one numeric column. `None` marks figures that are undefined
/// for the column's population: everything when the column is empty, the
/// standard deviation when it holds fewer than two values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: &'static str,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub median: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnStats {
    fn empty(column: &'static str) -> Self {
        Self {
            column,
            count: 0,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        }
    }
}

/// Summarize every numeric history column.
///
/// Optional columns (volume, adjusted close) count only the rows where a
/// value is present; integer volumes are widened to `f64` for the figures.
pub fn describe(history: &PriceHistory) -> Vec<ColumnStats> {
    type Extract = fn(&HistoryRow) -> Option<f64>;
    let columns: [(&'static str, Extract); 6] = [
        ("open", |row| Some(row.open)),
        ("high", |row| Some(row.high)),
        ("low", |row| Some(row.low)),
        ("close", |row| Some(row.close)),
        ("volume", |row| row.volume.map(|v| v as f64)),
        ("adj_close", |row| row.adj_close),
    ];

    columns
        .into_iter()
        .map(|(column, extract)| {
            let mut values: Vec<f64> = history.rows.iter().filter_map(extract).collect();
            column_stats(column, &mut values)
        })
        .collect()
}

fn column_stats(column: &'static str, values: &mut [f64]) -> ColumnStats {
    if values.is_empty() {
        return ColumnStats::empty(column);
    }

    values.sort_by(f64::total_cmp);
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    ColumnStats {
        column,
        count,
        mean: Some(mean),
        std: sample_std(values, mean),
        min: values.first().copied(),
        q25: Some(quantile(values, 0.25)),
        median: Some(quantile(values, 0.5)),
        q75: Some(quantile(values, 0.75)),
        max: values.last().copied(),
    }
}

/// Sample standard deviation (n - 1 denominator), `None` below two values.
fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let sum_sq = values
        .iter()
        .map(|value| {
            let delta = value - mean;
            delta * delta
        })
        .sum::<f64>();

    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Quantile by linear interpolation; `sorted` must be ascending, non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }

    let weight = position - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Symbol, TradingDate};

    fn history_with_closes(closes: &[f64]) -> PriceHistory {
        let symbol = Symbol::parse("^GSPC").expect("valid symbol");
        let mut date = TradingDate::parse("2023-01-02").expect("valid date");
        let rows = closes
            .iter()
            .map(|&close| {
                let row = HistoryRow::new(
                    date,
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    None,
                    None,
                    symbol.clone(),
                )
                .expect("valid row");
                date = date.next_day().expect("date in range");
                row
            })
            .collect();
        PriceHistory::new(symbol, rows)
    }

    #[test]
    fn four_value_column_matches_known_figures() {
        let history = history_with_closes(&[4.0, 2.0, 3.0, 1.0]);
        let stats = describe(&history);
        let close = stats
            .iter()
            .find(|column| column.column == "close")
            .expect("close column present");

        assert_eq!(close.count, 4);
        assert_eq!(close.mean, Some(2.5));
        let std = close.std.expect("std defined");
        assert!((std - 1.290_994_448_735_805_6).abs() < 1e-12);
        assert_eq!(close.min, Some(1.0));
        assert_eq!(close.q25, Some(1.75));
        assert_eq!(close.median, Some(2.5));
        assert_eq!(close.q75, Some(3.25));
        assert_eq!(close.max, Some(4.0));
    }

    #[test]
    fn single_value_column_has_no_std() {
        let history = history_with_closes(&[100.0]);
        let stats = describe(&history);
        let close = stats
            .iter()
            .find(|column| column.column == "close")
            .expect("close column present");

        assert_eq!(close.count, 1);
        assert_eq!(close.std, None);
        assert_eq!(close.min, Some(100.0));
        assert_eq!(close.median, Some(100.0));
        assert_eq!(close.max, Some(100.0));
    }

    #[test]
    fn absent_optional_column_counts_zero() {
        let history = history_with_closes(&[1.0, 2.0]);
        let stats = describe(&history);
        let volume = stats
            .iter()
            .find(|column| column.column == "volume")
            .expect("volume column present");

        assert_eq!(volume.count, 0);
        assert_eq!(volume.mean, None);
        assert_eq!(volume.max, None);
    }

    #[test]
    fn empty_history_describes_six_empty_columns() {
        let symbol = Symbol::parse("^FTSE").expect("valid symbol");
        let stats = describe(&PriceHistory::empty(symbol));

        assert_eq!(stats.len(), 6);
        assert!(stats.iter().all(|column| column.count == 0));
    }

    #[test]
    fn quartile_labels_render_as_percentages_in_json() {
        let history = history_with_closes(&[1.0, 2.0, 3.0]);
        let stats = describe(&history);
        let json = serde_json::to_value(&stats[3]).expect("serializable");

        assert!(json.get("25%").is_some());
        assert!(json.get("50%").is_some());
        assert!(json.get("75%").is_some());
    }
}
