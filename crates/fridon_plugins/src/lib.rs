//! The concrete analysis plugins for Fridon.
//!
//! Five plugins cover the default roster:
//!
//! - [`CoinTechnicalAnalyzerPlugin`] — RSI/MACD/Bollinger over daily candles.
//! - [`CoinTechnicalChartSearcherPlugin`] — EMA crossover and long-EMA
//!   support over 4h candles.
//! - [`CoinObserverPlugin`] — 24h on-chain trading summary from Birdeye.
//! - [`WalletPlugin`] — SOL balance lookups.
//! - [`JupiterPlugin`] — swap route quotes.
//!
//! Each plugin parses what it needs out of the raw message (see
//! [`extract`]) and abstains with `Ok(None)` when the message contains
//! nothing for it, so the whole roster can run over every message.

pub mod extract;

mod chart_searcher;
mod jupiter;
mod observer;
mod technical_analyzer;
mod wallet;

pub use chart_searcher::CoinTechnicalChartSearcherPlugin;
pub use jupiter::JupiterPlugin;
pub use observer::CoinObserverPlugin;
pub use technical_analyzer::CoinTechnicalAnalyzerPlugin;
pub use wallet::WalletPlugin;
