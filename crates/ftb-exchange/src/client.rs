//! FTX US REST client.
//!
//! Thin signed-GET adapter over `reqwest`. Only the endpoints this tool
//! reads are wired: fills, deposits, lending/borrow history, markets. All
//! failures map onto [`ExchangeError`]; there is no retry or backoff here —
//! errors propagate to the caller unmodified.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::ExchangeError;
use crate::records::{ApiEnvelope, BorrowPayment, Deposit, Fill, LendingPayment, Market};
use crate::sign;

pub const DEFAULT_BASE_URL: &str = "https://ftx.us/api";

/// The paginator's view of a trade-history source: one time-windowed page of
/// fills per call. Object-safe so tests can substitute an in-process source.
#[async_trait]
pub trait TradeHistory: Send + Sync {
    /// Up to `limit` fills with `time < end_time`, optionally restricted to
    /// one market. Page order is whatever the upstream returns.
    async fn fills_before(
        &self,
        market: Option<&str>,
        end_time: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Fill>, ExchangeError>;
}

#[derive(Debug, Clone)]
pub struct FtxClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    subaccount: Option<String>,
}

impl FtxClient {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        subaccount: Option<String>,
    ) -> Result<Self, ExchangeError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        if api_key.is_empty() || api_secret.is_empty() {
            return Err(ExchangeError::Config(
                "api key and secret must be non-empty".to_string(),
            ));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            api_secret,
            subaccount,
        })
    }

    /// Point the client at a different endpoint root (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub async fn markets(&self) -> Result<Vec<Market>, ExchangeError> {
        self.get("markets", &[]).await
    }

    pub async fn fills(
        &self,
        market: Option<&str>,
        end_time: Option<DateTime<Utc>>,
        limit: u32,
    ) -> Result<Vec<Fill>, ExchangeError> {
        let mut query: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(market) = market {
            query.push(("market", market.to_string()));
        }
        if let Some(end_time) = end_time {
            // The endpoint windows on unix seconds.
            query.push(("end_time", end_time.timestamp().to_string()));
        }
        self.get("fills", &query).await
    }

    pub async fn deposits(&self) -> Result<Vec<Deposit>, ExchangeError> {
        self.get("wallet/deposits", &[]).await
    }

    pub async fn lending_history(&self) -> Result<Vec<LendingPayment>, ExchangeError> {
        self.get("spot_margin/lending_history", &[]).await
    }

    pub async fn borrow_history(&self) -> Result<Vec<BorrowPayment>, ExchangeError> {
        self.get("spot_margin/borrow_history", &[]).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ExchangeError> {
        let mut url = reqwest::Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|err| ExchangeError::Config(format!("invalid endpoint url: {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        // The signature covers the path and query exactly as requested.
        let path_with_query = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        };
        let ts = Utc::now().timestamp_millis();
        let signature = sign::signature(&self.api_secret, ts, "GET", &path_with_query);

        let mut request = self
            .http
            .get(url)
            .header(sign::HEADER_KEY, &self.api_key)
            .header(sign::HEADER_SIGN, signature)
            .header(sign::HEADER_TS, ts.to_string());
        if let Some(subaccount) = &self.subaccount {
            request = request.header(sign::HEADER_SUBACCOUNT, sign::encode_subaccount(subaccount));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body).map_err(|err| {
            if status.is_success() {
                ExchangeError::Decode(format!("response decode failed: {err}"))
            } else {
                ExchangeError::Api {
                    status: Some(status.as_u16()),
                    message: body.chars().take(200).collect(),
                }
            }
        })?;

        if !envelope.success {
            return Err(ExchangeError::Api {
                status: (!status.is_success()).then_some(status.as_u16()),
                message: envelope
                    .error
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        envelope
            .result
            .ok_or_else(|| ExchangeError::Decode("success envelope without result".to_string()))
    }
}

#[async_trait]
impl TradeHistory for FtxClient {
    async fn fills_before(
        &self,
        market: Option<&str>,
        end_time: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Fill>, ExchangeError> {
        self.fills(market, Some(end_time), limit).await
    }
}
