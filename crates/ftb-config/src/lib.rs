//! ftb-config
//!
//! Runtime secret resolution for the exporter.
//!
//! # Contract
//! - Credentials are resolved from the environment **once** at startup and
//!   passed into constructors; no `std::env::var` calls scattered elsewhere.
//! - `Debug` output redacts secret values.
//! - Error messages reference the env var **NAME**, never the value.

use anyhow::{bail, Result};

pub const ENV_API_KEY: &str = "FTXUS_API_KEY";
pub const ENV_API_SECRET: &str = "FTXUS_API_SECRET";
pub const ENV_SUBACCOUNT: &str = "FTXUS_SUBACCOUNT";

/// Exchange credentials for one run. **Values are redacted in `Debug`.**
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    /// Optional sub-account; requests are scoped to it when set.
    pub subaccount: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<REDACTED>")
            .field("api_secret", &"<REDACTED>")
            .field("subaccount", &self.subaccount)
            .finish()
    }
}

impl Config {
    /// Resolve credentials from the environment. Empty values count as
    /// missing — an exported-but-blank var is a misconfiguration, not a key.
    pub fn from_env() -> Result<Self> {
        let api_key = non_empty(ENV_API_KEY)?;
        let api_secret = non_empty(ENV_API_SECRET)?;
        let subaccount = std::env::var(ENV_SUBACCOUNT)
            .ok()
            .filter(|v| !v.trim().is_empty());
        Ok(Self {
            api_key,
            api_secret,
            subaccount,
        })
    }
}

fn non_empty(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("{name} is not set (required)"),
    }
}
