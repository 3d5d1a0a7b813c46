//! On-chain token observation via Birdeye.

use crate::extract;
use fridon_analytics::providers::BirdeyeProvider;
use fridon_core::{Plugin, PluginError, PluginFuture, PluginMetadata};
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

/// Observation window, seconds.
const WINDOW_SECS: i64 = 24 * 60 * 60;
/// Candle interval within the window.
const INTERVAL: &str = "1h";

/// Summarizes the last 24 hours of hourly trading for a token address
/// named in the message.
#[derive(Debug, Clone)]
pub struct CoinObserverPlugin {
    birdeye: BirdeyeProvider,
}

impl Default for CoinObserverPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinObserverPlugin {
    /// Creates the plugin, reading the Birdeye key from the environment
    /// on first use.
    #[must_use]
    pub fn new() -> Self {
        Self {
            birdeye: BirdeyeProvider::from_env(),
        }
    }

    /// Creates the plugin over a specific provider.
    #[must_use]
    pub fn with_provider(birdeye: BirdeyeProvider) -> Self {
        Self { birdeye }
    }
}

impl Plugin for CoinObserverPlugin {
    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: "coin-observer",
            description: "24h on-chain trading summary for a token address",
        }
    }

    fn process<'a>(&'a self, message: &'a str) -> PluginFuture<'a> {
        Box::pin(async move {
            let Some(address) = extract::address(message) else {
                return Ok(None);
            };
            tracing::debug!(address, "observing token activity");

            let time_to = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0);
            let time_from = time_to - WINDOW_SECS;

            let candles = self
                .birdeye
                .ohlcv(address, INTERVAL, time_from, time_to)
                .await
                .map_err(|err| {
                    PluginError::execution_with_source(
                        format!("failed to observe token {address}"),
                        err,
                    )
                })?;

            if candles.is_empty() {
                return Ok(None);
            }

            let open = candles[0].o;
            let last = candles[candles.len() - 1].c;
            let high = candles.iter().map(|c| c.h).fold(f64::MIN, f64::max);
            let low = candles.iter().map(|c| c.l).fold(f64::MAX, f64::min);
            let volume: f64 = candles.iter().map(|c| c.v).sum();
            let change_pct = if open != 0.0 {
                (last - open) / open * 100.0
            } else {
                0.0
            };

            let report = json!({
                "plugin": "coin-observer",
                "address": address,
                "window": "24h",
                "candles": candles.len(),
                "price": last,
                "change_pct": change_pct,
                "high": high,
                "low": low,
                "volume": volume,
            });
            Ok(Some(serde_json::to_string(&report)?))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn message_without_address_is_ignored() {
        let plugin = CoinObserverPlugin::new();
        let out = plugin.process("observe BTC for me").await.unwrap();
        assert!(out.is_none());
    }
}
