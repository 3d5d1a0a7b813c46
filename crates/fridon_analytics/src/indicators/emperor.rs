//! Composite market-structure analyses: risk, trend, volume, trader activity.
//!
//! These read a candle series as a whole rather than producing a single
//! oscillator value, and feed the chart-searcher and observer plugins.

use crate::Candle;
use crate::candle::{closes, volumes};
use crate::indicators::ta::{ema, ema_series};
use serde::Serialize;

/// Trailing window for volume baselines and pivot detection.
const BASELINE_PERIOD: usize = 20;
/// Bars averaged for "recent" volume.
const RECENT_BARS: usize = 5;
/// Pivot lookaround for support/resistance detection.
const PIVOT_WINDOW: usize = 20;
/// Long EMA used as a trend backstop.
const LONG_EMA_PERIOD: usize = 200;

/// Risk profile of a series.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RiskProfile {
    /// Annualized volatility of close-to-close returns, percent.
    pub volatility: f64,
    /// Recent volume relative to its 20-bar baseline, percent.
    pub volume_trend: f64,
    /// Total price change over the series, percent.
    pub momentum: f64,
    /// Weighted 0-100 risk score.
    pub risk_score: f64,
}

/// Direction of the prevailing trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    /// Short EMA above long EMA.
    Up,
    /// Short EMA below long EMA.
    Down,
    /// EMAs coincide.
    Sideways,
}

/// Trend profile of a series.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TrendProfile {
    /// Prevailing direction from the EMA20/EMA50 relation.
    pub direction: TrendDirection,
    /// Share of bars printing new local highs or lows, 0-100.
    pub strength: f64,
    /// Total price change over the series, percent.
    pub momentum: f64,
}

/// Volume profile of a series.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VolumeProfile {
    /// Recent volume relative to its 20-bar baseline, percent.
    pub volume_trend: f64,
    /// Pearson correlation between closes and volumes.
    pub price_volume_correlation: f64,
    /// Whether recent volume exceeds mean + 2 sigma.
    pub abnormal_volume: bool,
}

/// Kind of a significant price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelKind {
    /// Price ceiling formed by local highs.
    Resistance,
    /// Price floor formed by local lows.
    Support,
}

/// A significant price level near the current price.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PriceLevel {
    /// The level's price.
    pub price: f64,
    /// Whether the level acts as support or resistance.
    pub kind: LevelKind,
}

/// Trader activity profile of a series.
#[derive(Debug, Clone, Serialize)]
pub struct TraderProfile {
    /// Bars with volume above the whale threshold (mean + 2 sigma).
    pub whale_movements: usize,
    /// Mean volume of those bars.
    pub average_whale_volume: f64,
    /// Nearest resistance and support around the current price.
    pub significant_levels: Vec<PriceLevel>,
}

/// EMA crossover state, the chart-searcher's fast/slow trend signal.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EmaCrossover {
    /// EMA over 20 bars.
    pub ema_short: f64,
    /// EMA over 50 bars.
    pub ema_long: f64,
    /// Direction implied by the crossover.
    pub direction: TrendDirection,
    /// Short-over-long spread, percent of the long EMA.
    pub spread_pct: f64,
}

/// Position of price relative to the 200-bar EMA.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LongEmaSupport {
    /// The 200-bar EMA level.
    pub ema: f64,
    /// Whether the last close sits above it.
    pub above: bool,
    /// Distance of the last close from the EMA, percent.
    pub distance_pct: f64,
}

/// Computes the risk profile: volatility, volume trend, momentum, and a
/// weighted score (50% volatility, 30% volume trend, 20% momentum).
#[must_use]
pub fn analyze_risk(candles: &[Candle]) -> RiskProfile {
    let prices = closes(candles);
    let vols = volumes(candles);

    let mut returns = Vec::with_capacity(prices.len().saturating_sub(1));
    for pair in prices.windows(2) {
        if pair[0] != 0.0 {
            returns.push((pair[1] - pair[0]) / pair[0]);
        }
    }

    let volatility = population_std_dev(&returns) * 365.0_f64.sqrt() * 100.0;
    let volume_trend = volume_trend(&vols);
    let momentum = momentum(&prices);

    RiskProfile {
        volatility,
        volume_trend,
        momentum,
        risk_score: risk_score(volatility, volume_trend, momentum),
    }
}

/// Computes the trend profile from the EMA20/EMA50 relation and the share of
/// bars printing fresh five-bar highs or lows.
#[must_use]
pub fn analyze_trend(candles: &[Candle]) -> TrendProfile {
    let prices = closes(candles);
    let ema_short = ema(&prices, 20);
    let ema_long = ema(&prices, 50);

    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

    let mut higher_highs = 0usize;
    let mut lower_lows = 0usize;
    for i in RECENT_BARS..candles.len() {
        let prev_high = max_of(&highs[i - RECENT_BARS..i]);
        let prev_low = min_of(&lows[i - RECENT_BARS..i]);
        if highs[i] > prev_high {
            higher_highs += 1;
        }
        if lows[i] < prev_low {
            lower_lows += 1;
        }
    }

    let strength = if candles.is_empty() {
        0.0
    } else {
        (higher_highs + lower_lows) as f64 / (candles.len() as f64 * 2.0) * 100.0
    };

    TrendProfile {
        direction: direction_of(ema_short, ema_long),
        strength,
        momentum: momentum(&prices),
    }
}

/// Computes the volume profile: baseline-relative trend, price/volume
/// correlation, and abnormal-volume detection at mean + 2 sigma.
#[must_use]
pub fn analyze_volume(candles: &[Candle]) -> VolumeProfile {
    let prices = closes(candles);
    let vols = volumes(candles);

    let recent = mean_of_last(&vols, RECENT_BARS);
    let vol_mean = mean(&vols);
    let vol_dev = population_std_dev(&vols);

    VolumeProfile {
        volume_trend: volume_trend(&vols),
        price_volume_correlation: correlation(&prices, &vols),
        abnormal_volume: recent > vol_mean + 2.0 * vol_dev,
    }
}

/// Computes the trader activity profile: whale-sized bars and the nearest
/// support/resistance levels within ±10% of the current price.
#[must_use]
pub fn analyze_traders(candles: &[Candle]) -> TraderProfile {
    let prices = closes(candles);
    let vols = volumes(candles);
    let current_price = prices.last().copied().unwrap_or(0.0);

    let vol_mean = mean(&vols);
    let whale_threshold = vol_mean + 2.0 * population_std_dev(&vols);
    let whale_volumes: Vec<f64> = vols
        .iter()
        .copied()
        .filter(|&v| v > whale_threshold)
        .collect();

    TraderProfile {
        whale_movements: whale_volumes.len(),
        average_whale_volume: mean(&whale_volumes),
        significant_levels: significant_levels(&prices, current_price),
    }
}

/// Fast/slow EMA crossover state for the chart searcher.
#[must_use]
pub fn ema_crossover(candles: &[Candle]) -> EmaCrossover {
    let prices = closes(candles);
    let ema_short = ema(&prices, 20);
    let ema_long = ema(&prices, 50);
    let spread_pct = if ema_long != 0.0 {
        (ema_short - ema_long) / ema_long * 100.0
    } else {
        0.0
    };

    EmaCrossover {
        ema_short,
        ema_long,
        direction: direction_of(ema_short, ema_long),
        spread_pct,
    }
}

/// Position of the last close relative to the 200-bar EMA.
#[must_use]
pub fn long_ema_support(candles: &[Candle]) -> LongEmaSupport {
    let prices = closes(candles);
    let long_ema = *ema_series(&prices, LONG_EMA_PERIOD).last().unwrap_or(&0.0);
    let last = prices.last().copied().unwrap_or(0.0);
    let distance_pct = if long_ema != 0.0 {
        (last - long_ema) / long_ema * 100.0
    } else {
        0.0
    };

    LongEmaSupport {
        ema: long_ema,
        above: last >= long_ema,
        distance_pct,
    }
}

// ─────────────────────
// Helpers
// ─────────────────────

fn direction_of(ema_short: f64, ema_long: f64) -> TrendDirection {
    if ema_short > ema_long {
        TrendDirection::Up
    } else if ema_short < ema_long {
        TrendDirection::Down
    } else {
        TrendDirection::Sideways
    }
}

/// Recent volume relative to its trailing baseline, percent.
fn volume_trend(vols: &[f64]) -> f64 {
    let baseline = trailing_mean(vols, BASELINE_PERIOD);
    if baseline == 0.0 {
        return 0.0;
    }
    let recent = mean_of_last(vols, RECENT_BARS);
    (recent - baseline) / baseline * 100.0
}

fn momentum(prices: &[f64]) -> f64 {
    match (prices.first(), prices.last()) {
        (Some(&start), Some(&end)) if start != 0.0 => (end - start) / start * 100.0,
        _ => 0.0,
    }
}

/// Weighted risk score: 50% volatility, 30% volume trend, 20% momentum,
/// each component capped at 100 before weighting.
fn risk_score(volatility: f64, volume_trend: f64, momentum: f64) -> f64 {
    let vol_score = volatility.abs().min(100.0);
    let vol_trend_score = volume_trend.abs().min(100.0);
    let momentum_score = momentum.abs().min(100.0);

    (vol_score * 0.5 + vol_trend_score * 0.3 + momentum_score * 0.2).clamp(0.0, 100.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of the trailing `period` values; short series average all of them.
fn trailing_mean(values: &[f64], period: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    mean(&values[values.len().saturating_sub(period)..])
}

fn mean_of_last(values: &[f64], count: usize) -> f64 {
    trailing_mean(values, count)
}

/// Population standard deviation over the whole series.
fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Pearson correlation; degenerate series yield 0.
fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let x = &x[..n];
    let y = &y[..n];

    let n_f = n as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n_f * sum_xy - sum_x * sum_y;
    let denominator = ((n_f * sum_x2 - sum_x * sum_x) * (n_f * sum_y2 - sum_y * sum_y)).sqrt();

    let r = numerator / denominator;
    if r.is_nan() { 0.0 } else { r }
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Finds the nearest resistance above and support below the current price,
/// looking only at pivots within ±10% of it. When no pivot qualifies the
/// levels fall back to ±5% of the current price.
fn significant_levels(prices: &[f64], current_price: f64) -> Vec<PriceLevel> {
    let min_price = current_price * 0.9;
    let max_price = current_price * 1.1;

    let mut levels: Vec<PriceLevel> = Vec::new();
    if prices.len() > PIVOT_WINDOW * 2 {
        for i in PIVOT_WINDOW..prices.len() - PIVOT_WINDOW {
            let price = prices[i];
            if price < min_price || price > max_price {
                continue;
            }
            let left = max_of(&prices[i - PIVOT_WINDOW..i]);
            let right = max_of(&prices[i + 1..i + 1 + PIVOT_WINDOW]);
            if price > left && price > right {
                levels.push(PriceLevel {
                    price,
                    kind: LevelKind::Resistance,
                });
            }
            let left = min_of(&prices[i - PIVOT_WINDOW..i]);
            let right = min_of(&prices[i + 1..i + 1 + PIVOT_WINDOW]);
            if price < left && price < right {
                levels.push(PriceLevel {
                    price,
                    kind: LevelKind::Support,
                });
            }
        }
    }

    levels.sort_by(|a, b| a.price.total_cmp(&b.price));

    let support = levels
        .iter()
        .rev()
        .find(|l| l.kind == LevelKind::Support && l.price < current_price)
        .copied()
        .unwrap_or(PriceLevel {
            price: current_price * 0.95,
            kind: LevelKind::Support,
        });
    let resistance = levels
        .iter()
        .find(|l| l.kind == LevelKind::Resistance && l.price > current_price)
        .copied()
        .unwrap_or(PriceLevel {
            price: current_price * 1.05,
            kind: LevelKind::Resistance,
        });

    vec![resistance, support]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(close: f64, volume: f64) -> Candle {
        Candle {
            open_time: 0,
            open: close,
            high: close * 1.01,
            low: close * 0.99,
            close,
            volume,
        }
    }

    fn series(closes: &[f64]) -> Vec<Candle> {
        closes.iter().map(|&c| candle(c, 100.0)).collect()
    }

    #[test]
    fn flat_series_has_no_risk() {
        let profile = analyze_risk(&series(&[10.0; 50]));
        assert_eq!(profile.volatility, 0.0);
        assert_eq!(profile.momentum, 0.0);
        assert_eq!(profile.risk_score, 0.0);
    }

    #[test]
    fn risk_score_weighs_components() {
        // volatility 200 (capped 100), volume trend 0, momentum 40
        assert_eq!(risk_score(200.0, 0.0, 40.0), 100.0 * 0.5 + 40.0 * 0.2);
        assert!(risk_score(1e6, 1e6, 1e6) <= 100.0);
    }

    #[test]
    fn uptrend_is_detected() {
        let prices: Vec<f64> = (1..=80).map(f64::from).collect();
        let profile = analyze_trend(&series(&prices));
        assert_eq!(profile.direction, TrendDirection::Up);
        assert!(profile.momentum > 0.0);
        assert!(profile.strength > 0.0);
    }

    #[test]
    fn downtrend_is_detected() {
        let prices: Vec<f64> = (1..=80).rev().map(f64::from).collect();
        let profile = analyze_trend(&series(&prices));
        assert_eq!(profile.direction, TrendDirection::Down);
        assert!(profile.momentum < 0.0);
    }

    #[test]
    fn correlated_price_and_volume() {
        let candles: Vec<Candle> = (1..=40).map(|i| candle(f64::from(i), f64::from(i))).collect();
        let profile = analyze_volume(&candles);
        assert!((profile.price_volume_correlation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_volume_correlation_is_zero() {
        let candles: Vec<Candle> = (1..=40).map(|i| candle(f64::from(i), 100.0)).collect();
        let profile = analyze_volume(&candles);
        assert_eq!(profile.price_volume_correlation, 0.0);
        assert!(!profile.abnormal_volume);
    }

    #[test]
    fn volume_spike_is_abnormal() {
        let mut candles: Vec<Candle> = (1..=40).map(|i| candle(f64::from(i), 100.0)).collect();
        for c in candles.iter_mut().rev().take(5) {
            c.volume = 10_000.0;
        }
        let profile = analyze_volume(&candles);
        assert!(profile.abnormal_volume);
        assert!(profile.volume_trend > 0.0);
    }

    #[test]
    fn whale_bars_are_counted() {
        let mut candles: Vec<Candle> = (0..50).map(|_| candle(10.0, 100.0)).collect();
        candles[10].volume = 50_000.0;
        candles[30].volume = 60_000.0;

        let profile = analyze_traders(&candles);
        assert_eq!(profile.whale_movements, 2);
        assert_eq!(profile.average_whale_volume, 55_000.0);
    }

    #[test]
    fn levels_fall_back_around_current_price() {
        // Too short for pivots: both levels come from the ±5% fallback.
        let profile = analyze_traders(&series(&[100.0; 10]));
        let [resistance, support] = profile.significant_levels[..] else {
            panic!("expected two levels");
        };
        assert_eq!(resistance.kind, LevelKind::Resistance);
        assert_eq!(resistance.price, 105.0);
        assert_eq!(support.kind, LevelKind::Support);
        assert_eq!(support.price, 95.0);
    }

    #[test]
    fn pivot_levels_bracket_current_price() {
        // A valley then recovery: the valley low should register as support.
        let mut prices = vec![100.0; 25];
        prices.extend((0..5).map(|i| 96.0 - f64::from(i))); // down to 92
        prices.extend((0..5).map(|i| 93.0 + f64::from(i))); // back up
        prices.extend(vec![100.0; 25]);

        let profile = analyze_traders(&series(&prices));
        let support = profile
            .significant_levels
            .iter()
            .find(|l| l.kind == LevelKind::Support)
            .unwrap();
        assert!(support.price < 100.0);
    }

    #[test]
    fn crossover_direction_matches_trend() {
        let rising: Vec<f64> = (1..=100).map(f64::from).collect();
        let crossover = ema_crossover(&series(&rising));
        assert_eq!(crossover.direction, TrendDirection::Up);
        assert!(crossover.spread_pct > 0.0);
    }

    #[test]
    fn long_ema_support_flags_price_position() {
        let rising: Vec<f64> = (1..=250).map(f64::from).collect();
        let support = long_ema_support(&series(&rising));
        assert!(support.above);
        assert!(support.distance_pct > 0.0);

        let falling: Vec<f64> = (1..=250).rev().map(f64::from).collect();
        let support = long_ema_support(&series(&falling));
        assert!(!support.above);
    }
}
