//! Currency normalization.
//!
//! The exchange treats a handful of USD stablecoins as fungible with USD
//! internally. Collapsing them to one symbol keeps the journal from growing
//! spurious multi-currency accounts and lets balances aggregate correctly.

/// Stablecoins the exchange credits and debits interchangeably with USD.
const STABLE_USD_COINS: &[&str] = &["USD", "USDC", "TUSD", "USDP", "BUSD", "HUSD"];

/// Map a currency symbol to its canonical journal symbol.
///
/// Any known USD-pegged stablecoin becomes `"USD"`; every other symbol is
/// returned unchanged. Total and idempotent.
pub fn normalize_currency(currency: &str) -> &str {
    if STABLE_USD_COINS.contains(&currency) {
        "USD"
    } else {
        currency
    }
}
