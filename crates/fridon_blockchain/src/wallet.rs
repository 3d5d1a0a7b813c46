//! Wallet balance service.

use crate::constants::LAMPORTS_PER_SOL;
use crate::{BlockchainError, SolanaRpc};
use serde::Serialize;

/// A wallet balance in native and UI units.
#[derive(Debug, Clone, Serialize)]
pub struct Balance {
    /// The queried address.
    pub address: String,
    /// The queried currency (`"SOL"` or a token account).
    pub currency: String,
    /// Raw amount in the smallest unit (lamports for SOL).
    pub raw_amount: u64,
    /// Amount scaled to UI units.
    pub ui_amount: f64,
}

/// Answers balance questions over a [`SolanaRpc`] connection.
#[derive(Debug, Clone)]
pub struct WalletService {
    rpc: SolanaRpc,
}

impl WalletService {
    /// Creates a service over the given RPC connection.
    #[must_use]
    pub fn new(rpc: SolanaRpc) -> Self {
        Self { rpc }
    }

    /// Creates a service using the environment-configured RPC endpoint.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(SolanaRpc::from_env())
    }

    /// Returns the balance of `address` in `currency`.
    ///
    /// `"SOL"` queries the native lamport balance. Any other currency is
    /// treated as an SPL token account address and queried directly; deriving
    /// associated token accounts from a mint is not done here.
    pub async fn get_balance(
        &self,
        address: &str,
        currency: &str,
    ) -> Result<Balance, BlockchainError> {
        if currency.eq_ignore_ascii_case("SOL") {
            let lamports = self.rpc.get_balance(address).await?;
            return Ok(Balance {
                address: address.to_string(),
                currency: "SOL".to_string(),
                raw_amount: lamports,
                ui_amount: lamports as f64 / LAMPORTS_PER_SOL as f64,
            });
        }

        let amount = self.rpc.get_token_account_balance(currency).await?;
        let raw_amount = amount.amount.parse::<u64>().map_err(|_| {
            BlockchainError::InvalidResponse("token amount not a decimal string".into())
        })?;
        let ui_amount = amount
            .ui_amount
            .unwrap_or(raw_amount as f64 / 10_f64.powi(i32::from(amount.decimals)));

        Ok(Balance {
            address: address.to_string(),
            currency: currency.to_string(),
            raw_amount,
            ui_amount,
        })
    }
}
