//! Classic technical analysis oscillators: RSI, MACD, Bollinger bands.

use crate::Candle;
use crate::candle::closes;
use serde::Serialize;

/// RSI lookback period.
const RSI_PERIOD: usize = 14;
/// MACD fast/slow/signal EMA periods.
const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;
/// Bollinger band window and width.
const BOLLINGER_PERIOD: usize = 20;
const BOLLINGER_STD_DEV: f64 = 2.0;

/// MACD line, signal line, and their difference.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Macd {
    /// Fast EMA minus slow EMA.
    pub macd: f64,
    /// EMA of the MACD line.
    pub signal: f64,
    /// MACD minus signal.
    pub histogram: f64,
}

/// Bollinger band levels.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BollingerBands {
    /// The middle band (SMA).
    pub middle: f64,
    /// Middle plus two standard deviations.
    pub upper: f64,
    /// Middle minus two standard deviations.
    pub lower: f64,
}

/// The oscillator bundle the technical analyzer plugin reports.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TaSummary {
    /// Relative strength index, 0-100.
    pub rsi: f64,
    /// MACD lines.
    pub macd: Macd,
    /// Bollinger band levels.
    pub bollinger: BollingerBands,
}

/// Computes the full oscillator bundle for a candle series.
#[must_use]
pub fn summarize(candles: &[Candle]) -> TaSummary {
    TaSummary {
        rsi: rsi(candles, RSI_PERIOD),
        macd: macd(candles),
        bollinger: bollinger_bands(candles),
    }
}

/// Relative strength index over the first `period` price deltas.
///
/// With gains but no losses in the window the RSI saturates at 100; a
/// window with neither stays at the neutral 50.
#[must_use]
pub fn rsi(candles: &[Candle], period: usize) -> f64 {
    let prices = closes(candles);
    if prices.len() < 2 || period == 0 {
        return 50.0;
    }

    let mut gains = Vec::with_capacity(prices.len() - 1);
    let mut losses = Vec::with_capacity(prices.len() - 1);
    for pair in prices.windows(2) {
        let delta = pair[1] - pair[0];
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    let window = period.min(gains.len());
    let avg_gain = gains[..window].iter().sum::<f64>() / window as f64;
    let avg_loss = losses[..window].iter().sum::<f64>() / window as f64;

    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// MACD with the signal line computed over the MACD series.
#[must_use]
pub fn macd(candles: &[Candle]) -> Macd {
    let prices = closes(candles);
    if prices.is_empty() {
        return Macd {
            macd: 0.0,
            signal: 0.0,
            histogram: 0.0,
        };
    }

    let fast = ema_series(&prices, MACD_FAST);
    let slow = ema_series(&prices, MACD_SLOW);
    let macd_series: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();

    let macd = *macd_series.last().unwrap_or(&0.0);
    let signal = *ema_series(&macd_series, MACD_SIGNAL)
        .last()
        .unwrap_or(&0.0);

    Macd {
        macd,
        signal,
        histogram: macd - signal,
    }
}

/// Bollinger bands over the trailing 20 closes.
#[must_use]
pub fn bollinger_bands(candles: &[Candle]) -> BollingerBands {
    let prices = closes(candles);
    let middle = sma(&prices, BOLLINGER_PERIOD);
    let deviation = trailing_std_dev(&prices, BOLLINGER_PERIOD);

    BollingerBands {
        middle,
        upper: middle + deviation * BOLLINGER_STD_DEV,
        lower: middle - deviation * BOLLINGER_STD_DEV,
    }
}

/// Exponential moving average of the whole series, seeded from the first value.
#[must_use]
pub fn ema(values: &[f64], period: usize) -> f64 {
    *ema_series(values, period).last().unwrap_or(&0.0)
}

/// Running EMA values, one per input value, seeded from the first value.
#[must_use]
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let k = 2.0 / (period as f64 + 1.0);
    let mut series = Vec::with_capacity(values.len());
    let mut current = first;
    series.push(current);
    for &value in &values[1..] {
        current = value * k + current * (1.0 - k);
        series.push(current);
    }
    series
}

/// Simple moving average over the trailing `period` values.
///
/// Short series average what is available.
#[must_use]
pub fn sma(values: &[f64], period: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let window = &values[values.len().saturating_sub(period)..];
    window.iter().sum::<f64>() / window.len() as f64
}

/// Standard deviation of the trailing `period` values around their mean.
#[must_use]
pub fn trailing_std_dev(values: &[f64], period: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let window = &values[values.len().saturating_sub(period)..];
    let mean = window.iter().sum::<f64>() / window.len() as f64;
    let variance =
        window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / window.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles_from_closes(prices: &[f64]) -> Vec<Candle> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                open_time: i as i64,
                open: close,
                high: close,
                low: close,
                close,
                volume: 1.0,
            })
            .collect()
    }

    #[test]
    fn sma_averages_trailing_window() {
        assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2), 3.5);
        // Short series fall back to what is available.
        assert_eq!(sma(&[4.0], 3), 4.0);
    }

    #[test]
    fn ema_of_constant_series_is_constant() {
        let values = [5.0; 30];
        assert!((ema(&values, 12) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn ema_tracks_rising_series_below_last_value() {
        let values: Vec<f64> = (1..=30).map(f64::from).collect();
        let result = ema(&values, 10);
        assert!(result < 30.0);
        assert!(result > 20.0);
    }

    #[test]
    fn rsi_saturates_on_monotonic_series() {
        let rising = candles_from_closes(&(1..=20).map(f64::from).collect::<Vec<_>>());
        assert_eq!(rsi(&rising, 14), 100.0);

        let falling = candles_from_closes(&(1..=20).rev().map(f64::from).collect::<Vec<_>>());
        assert!(rsi(&falling, 14) < 1.0);
    }

    #[test]
    fn rsi_of_flat_series_is_neutral() {
        let flat = candles_from_closes(&[10.0; 20]);
        assert_eq!(rsi(&flat, 14), 50.0);
    }

    #[test]
    fn rsi_of_balanced_series_is_midscale() {
        // Alternating equal gains and losses.
        let prices: Vec<f64> = (0..20)
            .map(|i| if i % 2 == 0 { 10.0 } else { 11.0 })
            .collect();
        let value = rsi(&candles_from_closes(&prices), 14);
        assert!((value - 50.0).abs() < 5.0, "rsi was {value}");
    }

    #[test]
    fn macd_of_flat_series_is_zero() {
        let flat = candles_from_closes(&[7.0; 40]);
        let result = macd(&flat);
        assert!(result.macd.abs() < 1e-12);
        assert!(result.signal.abs() < 1e-12);
        assert!(result.histogram.abs() < 1e-12);
    }

    #[test]
    fn macd_positive_in_uptrend() {
        let rising = candles_from_closes(&(1..=60).map(f64::from).collect::<Vec<_>>());
        let result = macd(&rising);
        assert!(result.macd > 0.0);
    }

    #[test]
    fn bollinger_bands_bracket_the_middle() {
        let prices: Vec<f64> = (0..25).map(|i| 100.0 + f64::from(i % 5)).collect();
        let bands = bollinger_bands(&candles_from_closes(&prices));
        assert!(bands.upper > bands.middle);
        assert!(bands.lower < bands.middle);
        assert!((bands.upper - bands.middle) - (bands.middle - bands.lower) < 1e-12);
    }

    #[test]
    fn bollinger_bands_collapse_on_constant_series() {
        let bands = bollinger_bands(&candles_from_closes(&[50.0; 30]));
        assert_eq!(bands.upper, bands.middle);
        assert_eq!(bands.lower, bands.middle);
    }
}
