//! Candlestick data providers.

mod binance;
mod birdeye;

pub use binance::{BinanceProvider, MarketSnapshot};
pub use birdeye::{BirdeyeCandle, BirdeyeProvider};
