//! Fixed sample history.
//!
//! Neither series is fetched: every call returns the same six monthly points,
//! whatever symbol is asked for. Swap these for real historical endpoints when
//! a provider is chosen.

use crate::models::ChartSeries;
use crate::services::chart_service::ChartError;

const SAMPLE_DATES: [&str; 6] = [
    "2024-02-01",
    "2024-03-01",
    "2024-04-01",
    "2024-05-01",
    "2024-06-01",
    "2024-07-01",
];

const SAMPLE_DOMINANCE: [f64; 6] = [60.0, 58.0, 62.0, 63.0, 61.0, 60.0];
const SAMPLE_PRICES: [f64; 6] = [30000.0, 32000.0, 31000.0, 33000.0, 34000.0, 35000.0];

fn sample_dates() -> Vec<String> {
    SAMPLE_DATES.iter().map(|d| d.to_string()).collect()
}

/// Bitcoin dominance over time
pub fn sample_dominance_history() -> Result<ChartSeries, ChartError> {
    ChartSeries::new("BTC Dominance Over Time", sample_dates(), SAMPLE_DOMINANCE.to_vec())
}

/// Price history for `symbol`; the values never depend on it
pub fn sample_price_history(symbol: &str) -> Result<ChartSeries, ChartError> {
    ChartSeries::new(
        format!("{} Price Over Last 6 Months", capitalize(symbol)),
        sample_dates(),
        SAMPLE_PRICES.to_vec(),
    )
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_history_ignores_symbol() {
        let btc = sample_price_history("bitcoin").unwrap();
        let doge = sample_price_history("dogecoin").unwrap();
        assert_eq!(btc.values(), doge.values());
        assert_eq!(btc.labels(), doge.labels());
        assert_eq!(doge.title(), "Dogecoin Price Over Last 6 Months");
    }

    #[test]
    fn test_dominance_history_is_fixed() {
        let series = sample_dominance_history().unwrap();
        assert_eq!(series.values(), &[60.0, 58.0, 62.0, 63.0, 61.0, 60.0]);
        assert_eq!(series.labels().first().map(String::as_str), Some("2024-02-01"));
    }
}
