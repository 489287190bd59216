//! Request signing.
//!
//! Every authenticated request carries an HMAC-SHA256 signature over
//! `{timestamp_millis}{METHOD}{path_with_query}`, hex encoded, alongside the
//! key and timestamp headers. The sub-account header, when present, is
//! percent-encoded because account names may contain spaces.

use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const HEADER_KEY: &str = "FTXUS-KEY";
pub const HEADER_SIGN: &str = "FTXUS-SIGN";
pub const HEADER_TS: &str = "FTXUS-TS";
pub const HEADER_SUBACCOUNT: &str = "FTXUS-SUBACCOUNT";

/// Hex HMAC-SHA256 signature for one request.
///
/// `path_with_query` is the URL path plus `?query` when a query string is
/// present, e.g. `/api/fills?limit=200`.
pub fn signature(secret: &str, ts_millis: i64, method: &str, path_with_query: &str) -> String {
    let payload = format!("{ts_millis}{method}{path_with_query}");
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Minimal percent-encoding for the sub-account header value: everything
/// outside the URL-safe unreserved set is escaped.
pub fn encode_subaccount(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
