//! Ledger model — entries, postings, and the derived preamble sets.
//!
//! The ledger is a build-once, read-once in-process structure: the importer
//! appends entries in fetch order, the renderer reads them back sorted.
//! Nothing here persists or round-trips.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::currency::normalize_currency;

/// Acquisition price recorded against a posting's quantity: one unit of the
/// posting currency cost `unit_price` of `commodity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostBasis {
    pub commodity: String,
    pub unit_price: Decimal,
}

/// One line within an entry, affecting one account/currency.
///
/// A posting without a quantity is "bare": it renders as the account alone
/// and exists to pull the account (and currency) into the opened-accounts
/// preamble. A quantity without a currency is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub account: String,
    pub currency: Option<String>,
    pub quantity: Option<Decimal>,
    pub cost_basis: Option<CostBasis>,
    pub comment: String,
}

impl Posting {
    /// A posting carrying a signed quantity of a currency.
    ///
    /// The currency is normalized here, once; callers never pre-normalize.
    pub fn amount(
        account: impl Into<String>,
        currency: &str,
        quantity: Decimal,
    ) -> Self {
        Self {
            account: account.into(),
            currency: Some(normalize_currency(currency).to_string()),
            quantity: Some(quantity),
            cost_basis: None,
            comment: String::new(),
        }
    }

    /// A quantity-less posting that only touches an account/currency so the
    /// preamble opens them.
    pub fn bare(account: impl Into<String>, currency: &str) -> Self {
        Self {
            account: account.into(),
            currency: Some(normalize_currency(currency).to_string()),
            quantity: None,
            cost_basis: None,
            comment: String::new(),
        }
    }

    /// Attach the acquisition price of one unit of this posting's currency.
    /// The cost-basis commodity is normalized the same way the currency is.
    pub fn with_cost_basis(mut self, commodity: &str, unit_price: Decimal) -> Self {
        self.cost_basis = Some(CostBasis {
            commodity: normalize_currency(commodity).to_string(),
            unit_price,
        });
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Bare in the rendering sense: nothing numeric to print.
    pub fn is_bare(&self) -> bool {
        self.currency.is_none() || self.quantity.is_none()
    }
}

/// A dated journal entry. The timestamp keeps full precision for ordering;
/// rendering truncates to the calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub postings: Vec<Posting>,
}

impl LedgerEntry {
    pub fn push(&mut self, posting: Posting) -> &mut Self {
        debug_assert!(
            !(posting.currency.is_none() && posting.quantity.is_some()),
            "posting quantity requires a currency"
        );
        self.postings.push(posting);
        self
    }
}

/// Insertion-ordered collection of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty entry and hand it back for posting.
    pub fn add_entry(
        &mut self,
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
    ) -> &mut LedgerEntry {
        self.entries.push(LedgerEntry {
            timestamp,
            description: description.into(),
            postings: Vec::new(),
        });
        self.entries.last_mut().expect("entry was just pushed")
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ascending by timestamp; ties keep insertion order (the sort
    /// is stable), so reruns over identical input render identically.
    pub fn entries_sorted(&self) -> Vec<&LedgerEntry> {
        let mut sorted: Vec<&LedgerEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.timestamp);
        sorted
    }

    /// Distinct accounts and currencies referenced by any posting, sorted.
    ///
    /// Full scan; called once per run when the preamble is rendered.
    pub fn accounts_and_currencies(&self) -> (BTreeSet<String>, BTreeSet<String>) {
        let mut accounts = BTreeSet::new();
        let mut currencies = BTreeSet::new();
        for entry in &self.entries {
            for posting in &entry.postings {
                accounts.insert(posting.account.clone());
                if let Some(currency) = &posting.currency {
                    currencies.insert(currency.clone());
                }
            }
        }
        (accounts, currencies)
    }
}
