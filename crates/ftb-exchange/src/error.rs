//! Error surface for the exchange adapter.

use std::fmt;

/// Errors the exchange adapter may return. Callers treat every variant as
/// fatal for the run; there is no retry layer in this crate.
#[derive(Debug)]
pub enum ExchangeError {
    /// Network or transport failure.
    Transport(String),
    /// The upstream API answered with an application-level error.
    Api {
        status: Option<u16>,
        message: String,
    },
    /// A response payload or numeric field could not be decoded.
    Decode(String),
    /// A required configuration value (e.g. API key) is missing or invalid.
    Config(String),
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::Transport(msg) => write!(f, "transport error: {msg}"),
            ExchangeError::Api {
                status: Some(s),
                message,
            } => write!(f, "exchange api error status={s}: {message}"),
            ExchangeError::Api {
                status: None,
                message,
            } => write!(f, "exchange api error: {message}"),
            ExchangeError::Decode(msg) => write!(f, "decode error: {msg}"),
            ExchangeError::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for ExchangeError {}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        ExchangeError::Transport(err.to_string())
    }
}
