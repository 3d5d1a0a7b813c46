//! Solana JSON-RPC client.

use crate::BlockchainError;
use crate::constants::MAINNET_RPC_URL;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    result: Option<Value>,
    error: Option<RpcError>,
}

/// SPL token amount as reported by the RPC node.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenAmount {
    /// Raw amount in the token's smallest unit, as a decimal string.
    pub amount: String,
    /// Decimal places of the smallest unit.
    pub decimals: u8,
    /// Amount scaled to a UI-friendly float.
    #[serde(rename = "uiAmount")]
    pub ui_amount: Option<f64>,
}

/// Minimal JSON-RPC 2.0 client for a Solana node.
#[derive(Clone)]
pub struct SolanaRpc {
    client: reqwest::Client,
    endpoint: String,
}

impl SolanaRpc {
    /// Creates a client against an explicit endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Creates a client using `SOLANA_RPC_URL` or the mainnet default.
    #[must_use]
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("SOLANA_RPC_URL").unwrap_or_else(|_| MAINNET_RPC_URL.to_string());
        Self::new(endpoint)
    }

    /// Returns the lamport balance of `address`.
    pub async fn get_balance(&self, address: &str) -> Result<u64, BlockchainError> {
        let result = self.call("getBalance", json!([address])).await?;
        result
            .get("value")
            .and_then(Value::as_u64)
            .ok_or_else(|| BlockchainError::InvalidResponse("getBalance missing value".into()))
    }

    /// Returns the balance of the SPL token account at `token_account`.
    pub async fn get_token_account_balance(
        &self,
        token_account: &str,
    ) -> Result<TokenAmount, BlockchainError> {
        let result = self
            .call("getTokenAccountBalance", json!([token_account]))
            .await?;
        let value = result.get("value").cloned().ok_or_else(|| {
            BlockchainError::InvalidResponse("getTokenAccountBalance missing value".into())
        })?;
        serde_json::from_value(value).map_err(BlockchainError::Json)
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, BlockchainError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        tracing::debug!(method, "solana rpc call");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| BlockchainError::Http(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| BlockchainError::Http(err.to_string()))?;

        if !status.is_success() {
            return Err(BlockchainError::Provider {
                status: Some(status.as_u16()),
                message: text,
            });
        }

        let envelope: RpcEnvelope = serde_json::from_str(&text)?;
        if let Some(error) = envelope.error {
            return Err(BlockchainError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        envelope
            .result
            .ok_or_else(|| BlockchainError::InvalidResponse("missing result".into()))
    }
}

impl core::fmt::Debug for SolanaRpc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SolanaRpc")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_surfaces_rpc_errors() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"Invalid param"}}"#;
        let envelope: RpcEnvelope = serde_json::from_str(body).unwrap();
        let error = envelope.error.unwrap();
        assert_eq!(error.code, -32602);
    }

    #[test]
    fn token_amount_parses_rpc_shape() {
        let body = r#"{"amount":"1500000","decimals":6,"uiAmount":1.5,"uiAmountString":"1.5"}"#;
        let amount: TokenAmount = serde_json::from_str(body).unwrap();
        assert_eq!(amount.decimals, 6);
        assert_eq!(amount.ui_amount, Some(1.5));
    }
}
