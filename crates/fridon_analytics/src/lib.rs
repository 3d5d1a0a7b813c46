//! Market data providers and technical indicators for Fridon.
//!
//! Two halves:
//!
//! - [`providers`] — HTTP clients for candlestick data: Binance for
//!   exchange-listed symbols, Birdeye for on-chain Solana tokens.
//! - [`indicators`] — pure functions over [`Candle`] series: the classic
//!   oscillators ([`indicators::ta`]) and composite market-structure analyses
//!   ([`indicators::emperor`]).

mod candle;
mod error;
pub mod indicators;
pub mod providers;

pub use candle::Candle;
pub use error::AnalyticsError;
