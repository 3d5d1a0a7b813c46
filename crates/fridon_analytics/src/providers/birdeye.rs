//! Birdeye on-chain market data provider.

use crate::AnalyticsError;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://public-api.birdeye.so";

/// A single OHLCV point from Birdeye.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BirdeyeCandle {
    /// Opening price.
    pub o: f64,
    /// Highest price.
    pub h: f64,
    /// Lowest price.
    pub l: f64,
    /// Closing price.
    pub c: f64,
    /// Traded volume.
    pub v: f64,
    /// Candle time, seconds since the Unix epoch.
    #[serde(rename = "unixTime")]
    pub unix_time: i64,
}

#[derive(Debug, Deserialize)]
struct OhlcvData {
    #[serde(default)]
    items: Vec<BirdeyeCandle>,
}

#[derive(Debug, Deserialize)]
struct OhlcvResponse {
    #[serde(default)]
    success: bool,
    data: Option<OhlcvData>,
}

/// HTTP client for the Birdeye DeFi API (Solana chain).
///
/// Requires an API key; created with [`from_env`](Self::from_env) the key is
/// resolved lazily so plugin construction stays infallible.
#[derive(Clone)]
pub struct BirdeyeProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl BirdeyeProvider {
    /// Creates a provider with an explicit API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: Some(api_key.into()),
        }
    }

    /// Creates a provider reading the key from `BIRDEYE_API_KEY`, if set.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: std::env::var("BIRDEYE_API_KEY").ok(),
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches OHLCV points for a token `address` over `[time_from, time_to]`
    /// (Unix seconds) at the given `interval` (e.g. `"1h"`).
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::MissingApiKey`] when no key is configured,
    /// and transport/payload errors otherwise.
    pub async fn ohlcv(
        &self,
        address: &str,
        interval: &str,
        time_from: i64,
        time_to: i64,
    ) -> Result<Vec<BirdeyeCandle>, AnalyticsError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AnalyticsError::MissingApiKey("BIRDEYE_API_KEY".to_string()))?;

        let url = format!(
            "{}/defi/ohlcv?address={address}&type={interval}&time_from={time_from}&time_to={time_to}",
            self.base_url
        );
        tracing::debug!(address, interval, "fetching birdeye ohlcv");

        let response = self
            .client
            .get(&url)
            .header("X-API-KEY", api_key)
            .header("x-chain", "solana")
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

        let parsed: OhlcvResponse = serde_json::from_str(&body)?;
        if !parsed.success {
            return Err(AnalyticsError::Provider {
                status: None,
                message: body,
            });
        }

        Ok(parsed.data.map(|data| data.items).unwrap_or_default())
    }
}

impl core::fmt::Debug for BirdeyeProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BirdeyeProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_deref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_payload_parses() {
        let body = r#"{
            "success": true,
            "data": {
                "items": [
                    {"o": 1.0, "h": 1.2, "l": 0.9, "c": 1.1, "v": 5000.0, "unixTime": 1700000000}
                ]
            }
        }"#;
        let parsed: OhlcvResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.data.unwrap().items[0].c, 1.1);
    }

    #[tokio::test]
    async fn missing_key_is_an_error() {
        let provider = BirdeyeProvider {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        };
        assert!(matches!(
            provider.ohlcv("addr", "1h", 0, 1).await,
            Err(AnalyticsError::MissingApiKey(_))
        ));
    }
}
