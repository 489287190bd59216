//! ftb-exchange
//!
//! FTX US REST adapter: request signing, typed wire records, envelope
//! decoding, market-precision decimal conversion, and the `TradeHistory`
//! trait the importer paginates over.
//!
//! This crate does **not** paginate, build ledger entries, or render —
//! callers fetch records and hand them to ftb-import.

mod client;
mod error;
mod precision;
mod records;
mod sign;
mod symbol;

pub use client::{FtxClient, TradeHistory, DEFAULT_BASE_URL};
pub use error::ExchangeError;
pub use precision::{exact_decimal, MarketRegistry};
pub use records::{
    ApiEnvelope, BorrowPayment, Deposit, Fill, LendingPayment, Liquidity, Market, Side,
};
pub use sign::{
    encode_subaccount, signature, HEADER_KEY, HEADER_SIGN, HEADER_SUBACCOUNT, HEADER_TS,
};
pub use symbol::Symbol;
