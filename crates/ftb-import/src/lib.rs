//! ftb-import
//!
//! The two halves of the import pipeline:
//! - `fetch`: exhaustive, duplicate-free pagination over the fills endpoint
//! - `builder`: account events → balanced double-entry ledger postings
//!
//! This crate owns accounting policy. It does not render (ftb-ledger) and
//! does not speak HTTP (ftb-exchange).

mod builder;
mod fetch;

pub use builder::{AccountEvent, EntryBuilder};
pub use fetch::fetch_all_fills;
