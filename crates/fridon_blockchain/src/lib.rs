//! Solana wallet and swap services for Fridon.
//!
//! A thin JSON-RPC client ([`SolanaRpc`]) feeds the wallet balance service,
//! and a Jupiter aggregator client backs swap route quoting. No transactions
//! are signed or submitted here; the services answer questions about
//! balances and routes.

pub mod constants;
mod error;
mod rpc;
mod swap;
mod wallet;

pub use error::BlockchainError;
pub use rpc::{SolanaRpc, TokenAmount};
pub use swap::{JupiterClient, QuoteResponse, SwapRoute, SwapService};
pub use wallet::{Balance, WalletService};
