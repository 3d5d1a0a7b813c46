//! Technical indicators over candle series.
//!
//! All functions are pure and operate on in-memory series; fetch candles with
//! a [`provider`](crate::providers) first. Series are oldest-first throughout.

pub mod emperor;
pub mod ta;
