//! Candlestick data model.

use crate::AnalyticsError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single OHLCV candlestick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Open time, milliseconds since the Unix epoch.
    pub open_time: i64,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded base-asset volume.
    pub volume: f64,
}

impl Candle {
    /// Parses a Binance kline row.
    ///
    /// Binance returns each kline as a heterogeneous JSON array:
    /// `[openTime, "open", "high", "low", "close", "volume", closeTime, ...]`
    /// with prices encoded as strings.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidData`] when the row is too short or a
    /// field does not parse.
    pub fn from_kline_row(row: &Value) -> Result<Self, AnalyticsError> {
        let fields = row
            .as_array()
            .filter(|fields| fields.len() >= 6)
            .ok_or_else(|| AnalyticsError::InvalidData("kline row too short".to_string()))?;

        let open_time = fields[0]
            .as_i64()
            .ok_or_else(|| AnalyticsError::InvalidData("kline open time not an integer".into()))?;

        Ok(Self {
            open_time,
            open: numeric_field(&fields[1], "open")?,
            high: numeric_field(&fields[2], "high")?,
            low: numeric_field(&fields[3], "low")?,
            close: numeric_field(&fields[4], "close")?,
            volume: numeric_field(&fields[5], "volume")?,
        })
    }
}

fn numeric_field(value: &Value, name: &str) -> Result<f64, AnalyticsError> {
    let parsed = match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or_else(|| AnalyticsError::InvalidData(format!("kline {name} price not numeric")))
}

/// Extracts closing prices from a candle series.
#[must_use]
pub(crate) fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Extracts volumes from a candle series.
#[must_use]
pub(crate) fn volumes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.volume).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_binance_kline_row() {
        let row = json!([
            1700000000000_i64,
            "42000.10",
            "42500.00",
            "41800.55",
            "42250.00",
            "1234.5",
            1700003599999_i64,
            "52000000.0",
            100,
            "600.0",
            "25000000.0",
            "0"
        ]);

        let candle = Candle::from_kline_row(&row).unwrap();
        assert_eq!(candle.open_time, 1700000000000);
        assert_eq!(candle.open, 42000.10);
        assert_eq!(candle.close, 42250.00);
        assert_eq!(candle.volume, 1234.5);
    }

    #[test]
    fn rejects_short_row() {
        let row = json!([1700000000000_i64, "1", "2"]);
        assert!(Candle::from_kline_row(&row).is_err());
    }

    #[test]
    fn rejects_non_numeric_price() {
        let row = json!([1700000000000_i64, "x", "2", "3", "4", "5"]);
        assert!(Candle::from_kline_row(&row).is_err());
    }
}
