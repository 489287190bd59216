//! Wire records — the exchange's JSON payloads, typed.
//!
//! Numeric amounts arrive as JSON floats and stay `f64` here; the importer
//! converts them to exact decimals at its boundary (see `precision`). These
//! structs also serialize, because entry descriptions embed a raw dump of
//! the originating record for traceability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every REST response wraps its payload in this envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Order side of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

/// Whether the fill added liquidity (maker) or consumed it (taker); decides
/// which fee rate applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Liquidity {
    Maker,
    Taker,
}

impl Liquidity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Liquidity::Maker => "maker",
            Liquidity::Taker => "taker",
        }
    }
}

/// One executed fill from `GET /fills`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub id: u64,
    /// Trading pair, e.g. `"BTC/USD"`.
    pub market: String,
    pub side: Side,
    pub price: f64,
    pub size: f64,
    pub fee: f64,
    pub fee_rate: f64,
    pub fee_currency: String,
    pub liquidity: Liquidity,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub order_id: Option<u64>,
    #[serde(default)]
    pub trade_id: Option<u64>,
}

/// One record from `GET /wallet/deposits`. `size` is null on cancelled or
/// never-completed deposits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: u64,
    pub coin: String,
    #[serde(default)]
    pub size: Option<f64>,
    pub status: String,
    pub time: DateTime<Utc>,
}

/// One hourly lending payout from `GET /spot_margin/lending_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LendingPayment {
    pub coin: String,
    pub time: DateTime<Utc>,
    /// Interest received, in `coin`.
    pub proceeds: f64,
    pub rate: f64,
    pub size: f64,
}

/// One hourly borrow charge from `GET /spot_margin/borrow_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowPayment {
    pub coin: String,
    pub time: DateTime<Utc>,
    /// Interest paid, in `coin`.
    pub cost: f64,
    pub rate: f64,
    pub size: f64,
}

/// Market metadata from `GET /markets`; only the precision increments matter
/// to this tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub name: String,
    pub price_increment: f64,
    pub size_increment: f64,
}
