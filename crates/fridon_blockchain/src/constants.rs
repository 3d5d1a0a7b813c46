//! Well-known Solana token mints and network constants.

/// Default mainnet RPC endpoint.
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// USDC mint address.
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

/// Wrapped SOL mint address.
pub const WSOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Default swap slippage, basis points.
pub const JUPITER_SLIPPAGE_BPS: u16 = 50;

/// Lamports per SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// A token the swap service can resolve by symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    /// Ticker symbol as users write it.
    pub symbol: &'static str,
    /// Mint address.
    pub mint: &'static str,
    /// Decimal places of the smallest unit.
    pub decimals: u8,
}

/// Tokens resolvable by symbol in swap requests.
pub const KNOWN_TOKENS: &[TokenInfo] = &[
    TokenInfo {
        symbol: "SOL",
        mint: WSOL_MINT,
        decimals: 9,
    },
    TokenInfo {
        symbol: "USDC",
        mint: USDC_MINT,
        decimals: 6,
    },
];

/// Looks up a token by its ticker symbol (case-insensitive).
#[must_use]
pub fn token_by_symbol(symbol: &str) -> Option<&'static TokenInfo> {
    KNOWN_TOKENS
        .iter()
        .find(|token| token.symbol.eq_ignore_ascii_case(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(token_by_symbol("sol").unwrap().decimals, 9);
        assert_eq!(token_by_symbol("USDC").unwrap().mint, USDC_MINT);
        assert!(token_by_symbol("DOGE").is_none());
    }
}
