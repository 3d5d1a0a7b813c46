//! Jupiter swap route quoting.

use crate::BlockchainError;
use crate::constants::{JUPITER_SLIPPAGE_BPS, token_by_symbol};
use serde::{Deserialize, Serialize};

const DEFAULT_QUOTE_URL: &str = "https://quote-api.jup.ag/v6";

/// Raw quote payload from the Jupiter API, amounts in atomic units.
#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    /// Input amount, as a decimal string.
    #[serde(rename = "inAmount")]
    pub in_amount: String,
    /// Output amount, as a decimal string.
    #[serde(rename = "outAmount")]
    pub out_amount: String,
    /// Price impact, percent, as a decimal string.
    #[serde(rename = "priceImpactPct")]
    pub price_impact_pct: String,
}

/// A quoted swap route. Unsigned: nothing here submits a transaction.
#[derive(Debug, Clone, Serialize)]
pub struct SwapRoute {
    /// Input token symbol.
    pub from_token: String,
    /// Output token symbol.
    pub to_token: String,
    /// Input amount in UI units.
    pub in_amount: f64,
    /// Quoted output amount in UI units.
    pub out_amount: f64,
    /// Quoted price impact, percent.
    pub price_impact_pct: f64,
}

/// HTTP client for the Jupiter aggregator quote API.
#[derive(Debug, Clone)]
pub struct JupiterClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for JupiterClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JupiterClient {
    /// Creates a client against the public quote API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_QUOTE_URL.to_string(),
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches a quote for swapping `amount` atomic units of `input_mint`
    /// into `output_mint`, at the default slippage.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unparseable payload.
    pub async fn quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        amount: u64,
    ) -> Result<QuoteResponse, BlockchainError> {
        let url = format!(
            "{}/quote?inputMint={input_mint}&outputMint={output_mint}&amount={amount}&slippageBps={JUPITER_SLIPPAGE_BPS}",
            self.base_url
        );
        tracing::debug!(input_mint, output_mint, amount, "fetching jupiter quote");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| BlockchainError::Http(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| BlockchainError::Http(err.to_string()))?;

        if !status.is_success() {
            return Err(BlockchainError::Provider {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(BlockchainError::Json)
    }
}

/// Quotes swap routes between symbol-named tokens.
#[derive(Debug, Clone, Default)]
pub struct SwapService {
    jupiter: JupiterClient,
}

impl SwapService {
    /// Creates a service over the given Jupiter client.
    #[must_use]
    pub fn new(jupiter: JupiterClient) -> Self {
        Self { jupiter }
    }

    /// Quotes a route swapping `amount` (UI units) of `from_token` into
    /// `to_token`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockchainError::UnknownToken`] for symbols outside the
    /// known-mint table, and transport errors from the quote API.
    pub async fn quote(
        &self,
        from_token: &str,
        to_token: &str,
        amount: f64,
    ) -> Result<SwapRoute, BlockchainError> {
        let input = token_by_symbol(from_token)
            .ok_or_else(|| BlockchainError::UnknownToken(from_token.to_string()))?;
        let output = token_by_symbol(to_token)
            .ok_or_else(|| BlockchainError::UnknownToken(to_token.to_string()))?;

        let atomic_amount = to_atomic(amount, input.decimals);
        let quote = self
            .jupiter
            .quote(input.mint, output.mint, atomic_amount)
            .await?;

        let out_atomic = quote.out_amount.parse::<u64>().map_err(|_| {
            BlockchainError::InvalidResponse("quote outAmount not a decimal string".into())
        })?;
        let in_atomic = quote.in_amount.parse::<u64>().map_err(|_| {
            BlockchainError::InvalidResponse("quote inAmount not a decimal string".into())
        })?;
        let price_impact_pct = quote.price_impact_pct.parse::<f64>().unwrap_or(0.0);

        Ok(SwapRoute {
            from_token: input.symbol.to_string(),
            to_token: output.symbol.to_string(),
            in_amount: from_atomic(in_atomic, input.decimals),
            out_amount: from_atomic(out_atomic, output.decimals),
            price_impact_pct,
        })
    }
}

fn to_atomic(amount: f64, decimals: u8) -> u64 {
    (amount * 10_f64.powi(i32::from(decimals))).round() as u64
}

fn from_atomic(amount: u64, decimals: u8) -> f64 {
    amount as f64 / 10_f64.powi(i32::from(decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_conversion_round_trips() {
        assert_eq!(to_atomic(1.5, 9), 1_500_000_000);
        assert_eq!(from_atomic(1_500_000_000, 9), 1.5);
        assert_eq!(to_atomic(2.0, 6), 2_000_000);
    }

    #[test]
    fn quote_payload_parses() {
        let body = r#"{
            "inAmount": "1000000000",
            "outAmount": "152340000",
            "priceImpactPct": "0.05",
            "routePlan": []
        }"#;
        let quote: QuoteResponse = serde_json::from_str(body).unwrap();
        assert_eq!(quote.out_amount, "152340000");
        assert_eq!(quote.price_impact_pct, "0.05");
    }

    #[tokio::test]
    async fn client_quote_is_directly_callable() {
        use crate::constants::{USDC_MINT, WSOL_MINT};

        // Nothing listens here; the call must fail at transport, proving
        // the client can be driven without going through SwapService.
        let client = JupiterClient::new().with_base_url("http://127.0.0.1:1");
        let result = client.quote(WSOL_MINT, USDC_MINT, 1_000_000_000).await;
        assert!(matches!(result, Err(BlockchainError::Http(_))));
    }

    #[tokio::test]
    async fn unknown_symbol_is_rejected() {
        let service = SwapService::default();
        assert!(matches!(
            service.quote("DOGE", "USDC", 1.0).await,
            Err(BlockchainError::UnknownToken(_))
        ));
    }
}
