//! Binance market data provider.

use crate::{AnalyticsError, Candle};
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://api.binance.com";
const DEFAULT_KLINE_LIMIT: u32 = 100;

/// Current price plus recent candles for a symbol.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    /// Recent candles, oldest first.
    pub candles: Vec<Candle>,
    /// Last traded price.
    pub current_price: f64,
}

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: String,
}

/// HTTP client for the Binance public market data API.
///
/// Symbols are quoted against USDT, matching how users name coins in chat
/// ("BTC", "SOL") rather than full pair names.
#[derive(Debug, Clone)]
pub struct BinanceProvider {
    client: reqwest::Client,
    base_url: String,
}

impl Default for BinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BinanceProvider {
    /// Creates a new provider against the public API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches the current price and recent klines for `symbol` (e.g. `"BTC"`).
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a payload
    /// that does not contain usable price data.
    pub async fn ohlcv(
        &self,
        symbol: &str,
        interval: &str,
    ) -> Result<MarketSnapshot, AnalyticsError> {
        let pair = format!("{symbol}USDT");
        tracing::debug!(%pair, interval, "fetching binance market data");

        let ticker_url = format!("{}/api/v3/ticker/price?symbol={pair}", self.base_url);
        let ticker: TickerPrice = self.get_json(&ticker_url).await?;
        let current_price = ticker
            .price
            .parse::<f64>()
            .map_err(|_| AnalyticsError::InvalidData("ticker price not numeric".to_string()))?;

        let klines_url = format!(
            "{}/api/v3/klines?symbol={pair}&interval={interval}&limit={DEFAULT_KLINE_LIMIT}",
            self.base_url
        );
        let rows: Value = self.get_json(&klines_url).await?;
        let candles = parse_klines(&rows)?;

        Ok(MarketSnapshot {
            candles,
            current_price,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, AnalyticsError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| AnalyticsError::Http(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AnalyticsError::Http(err.to_string()))?;

        if !status.is_success() {
            return Err(AnalyticsError::Provider {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(AnalyticsError::Json)
    }
}

/// Parses the kline array payload into candles, oldest first.
fn parse_klines(rows: &Value) -> Result<Vec<Candle>, AnalyticsError> {
    let rows = rows
        .as_array()
        .filter(|rows| !rows.is_empty())
        .ok_or_else(|| AnalyticsError::InvalidData("empty or non-array kline payload".into()))?;

    rows.iter().map(Candle::from_kline_row).collect()
}
