//! Trend-structure analysis over four-hour candles.

use crate::extract;
use fridon_analytics::indicators::emperor;
use fridon_analytics::providers::BinanceProvider;
use fridon_core::{Plugin, PluginError, PluginFuture, PluginMetadata};
use serde_json::json;

/// Interval used for trend analysis.
const INTERVAL: &str = "4h";

/// Reports EMA crossover state and long-EMA support for a coin named in the
/// message.
#[derive(Debug, Clone, Default)]
pub struct CoinTechnicalChartSearcherPlugin {
    binance: BinanceProvider,
}

impl CoinTechnicalChartSearcherPlugin {
    /// Creates the plugin against the public Binance API.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the plugin over a specific provider.
    #[must_use]
    pub fn with_provider(binance: BinanceProvider) -> Self {
        Self { binance }
    }
}

impl Plugin for CoinTechnicalChartSearcherPlugin {
    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: "coin-technical-chart-searcher",
            description: "EMA crossover and long-EMA support analysis over 4h candles",
        }
    }

    fn process<'a>(&'a self, message: &'a str) -> PluginFuture<'a> {
        Box::pin(async move {
            let Some(symbol) = extract::symbol(message) else {
                return Ok(None);
            };
            tracing::debug!(symbol, "running trend analysis");

            let snapshot = self
                .binance
                .ohlcv(symbol, INTERVAL)
                .await
                .map_err(|err| {
                    PluginError::execution_with_source(
                        format!("failed to fetch {symbol} chart data"),
                        err,
                    )
                })?;

            let crossover = emperor::ema_crossover(&snapshot.candles);
            let support = emperor::long_ema_support(&snapshot.candles);

            let report = json!({
                "plugin": "coin-technical-chart-searcher",
                "symbol": symbol,
                "price": snapshot.current_price,
                "ema_crossover": crossover,
                "long_ema_support": support,
            });
            Ok(Some(serde_json::to_string(&report)?))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn message_without_symbol_is_ignored() {
        let plugin = CoinTechnicalChartSearcherPlugin::new();
        let out = plugin.process("how are things going").await.unwrap();
        assert!(out.is_none());
    }
}
