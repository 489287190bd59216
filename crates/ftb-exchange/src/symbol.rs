//! Trading-pair symbol parsing.

use std::fmt;

use crate::error::ExchangeError;

/// A parsed `"BASE/QUOTE"` trading pair.
///
/// Invariant: exactly one `/` separator and both halves non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    base: String,
    quote: String,
}

impl Symbol {
    pub fn parse(raw: &str) -> Result<Self, ExchangeError> {
        let mut parts = raw.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(base), Some(quote), None) if !base.is_empty() && !quote.is_empty() => {
                Ok(Self {
                    base: base.to_string(),
                    quote: quote.to_string(),
                })
            }
            _ => Err(ExchangeError::Decode(format!(
                "malformed market symbol '{raw}': expected BASE/QUOTE"
            ))),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_base_and_quote() {
        let sym = Symbol::parse("BTC/USD").unwrap();
        assert_eq!(sym.base(), "BTC");
        assert_eq!(sym.quote(), "USD");
        assert_eq!(sym.to_string(), "BTC/USD");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(Symbol::parse("BTCUSD").is_err());
    }

    #[test]
    fn rejects_extra_separator() {
        assert!(Symbol::parse("BTC/USD/EUR").is_err());
    }

    #[test]
    fn rejects_empty_halves() {
        assert!(Symbol::parse("/USD").is_err());
        assert!(Symbol::parse("BTC/").is_err());
        assert!(Symbol::parse("/").is_err());
        assert!(Symbol::parse("").is_err());
    }
}
