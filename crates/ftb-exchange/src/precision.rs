//! Exact-decimal conversion at the float boundary.
//!
//! The exchange serializes amounts as JSON floats. Interpreting those bits
//! directly would leak binary-float artifacts into the journal, so every
//! amount is laundered through a decimal string first:
//!
//! - trade price/size use the market's officially rounded representation
//!   (decimal places derived from the market's price/size increment),
//! - everything else uses the float's shortest round-trip representation,
//!   which reproduces the digits the exchange originally serialized.
//!
//! Parse failures are fatal; the importer assumes provider-formatted fields.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ExchangeError;
use crate::records::Market;

/// Convert through the shortest round-trip string, `Decimal(str(x))`-style.
pub fn exact_decimal(value: f64) -> Result<Decimal, ExchangeError> {
    parse_decimal(&value.to_string())
}

fn parse_decimal(repr: &str) -> Result<Decimal, ExchangeError> {
    Decimal::from_str(repr)
        .map_err(|err| ExchangeError::Decode(format!("unparseable amount '{repr}': {err}")))
}

/// Decimal places implied by a market increment, e.g. `0.0001` -> 4.
fn increment_places(increment: f64) -> usize {
    match increment.to_string().split_once('.') {
        Some((_, frac)) => frac.len(),
        None => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarketRules {
    price_places: usize,
    size_places: usize,
}

/// Per-market precision rules, built once from `GET /markets`.
#[derive(Debug, Clone, Default)]
pub struct MarketRegistry {
    rules: BTreeMap<String, MarketRules>,
}

impl MarketRegistry {
    pub fn from_markets(markets: &[Market]) -> Self {
        let mut rules = BTreeMap::new();
        for market in markets {
            rules.insert(
                market.name.clone(),
                MarketRules {
                    price_places: increment_places(market.price_increment),
                    size_places: increment_places(market.size_increment),
                },
            );
        }
        Self { rules }
    }

    /// A price, rounded to the market's quoted precision.
    pub fn price_to_decimal(&self, market: &str, price: f64) -> Result<Decimal, ExchangeError> {
        self.to_decimal(price, self.rules.get(market).map(|r| r.price_places))
    }

    /// An order size, rounded to the market's quoted precision.
    pub fn size_to_decimal(&self, market: &str, size: f64) -> Result<Decimal, ExchangeError> {
        self.to_decimal(size, self.rules.get(market).map(|r| r.size_places))
    }

    /// Unknown markets (delisted, or records with no market at all) fall
    /// back to the shortest round-trip form — still exact, just unrounded.
    fn to_decimal(&self, value: f64, places: Option<usize>) -> Result<Decimal, ExchangeError> {
        match places {
            Some(places) => parse_decimal(&format!("{value:.places$}")),
            None => exact_decimal(value),
        }
    }
}
