//! Message parsing helpers shared by the plugins.
//!
//! Users address coins by ticker ("BTC", "SOL") and accounts by base58
//! address; these helpers pull both out of free-form chat text.

use once_cell::sync::Lazy;
use regex::Regex;

static SYMBOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{2,10}\b").unwrap());

// Base58 alphabet: no 0, O, I, or l. Solana addresses are 32-44 chars.
static ADDRESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[1-9A-HJ-NP-Za-km-z]{32,44}").unwrap());

static AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// Extracts the first ticker symbol from a message.
#[must_use]
pub fn symbol(message: &str) -> Option<&str> {
    SYMBOL.find(message).map(|m| m.as_str())
}

/// Extracts ticker symbols in order of appearance, without duplicates.
#[must_use]
pub fn symbols(message: &str) -> Vec<&str> {
    let mut found = Vec::new();
    for m in SYMBOL.find_iter(message) {
        if !found.contains(&m.as_str()) {
            found.push(m.as_str());
        }
    }
    found
}

/// Extracts the first base58 account address from a message.
#[must_use]
pub fn address(message: &str) -> Option<&str> {
    ADDRESS.find(message).map(|m| m.as_str())
}

/// Extracts the first numeric amount from a message.
#[must_use]
pub fn amount(message: &str) -> Option<f64> {
    AMOUNT.find(message).and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_ticker_symbols() {
        assert_eq!(symbol("what's up with BTC today?"), Some("BTC"));
        assert_eq!(symbol("no coins here"), None);
        assert_eq!(symbols("swap SOL for USDC, then more SOL"), vec!["SOL", "USDC"]);
    }

    #[test]
    fn single_letters_are_not_symbols() {
        assert_eq!(symbol("I want a coin"), None);
    }

    #[test]
    fn finds_base58_addresses() {
        let addr = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
        let message = format!("balance of {addr} please");
        assert_eq!(address(&message), Some(addr));
        assert_eq!(address("nothing that long"), None);
    }

    #[test]
    fn finds_amounts() {
        assert_eq!(amount("swap 1.5 SOL"), Some(1.5));
        assert_eq!(amount("swap 100 SOL"), Some(100.0));
        assert_eq!(amount("swap some SOL"), None);
    }
}
