//! Exhaustive, duplicate-free pagination over the fills endpoint.
//!
//! The endpoint windows on time, not on a cursor, and pages are not
//! guaranteed disjoint. The loop walks backward from now, rewinding the
//! window's upper bound to just past the oldest record of each page. The
//! one-second overlap means a record sitting exactly on a page boundary is
//! fetched twice rather than never; the id map absorbs the duplicates.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::{Duration, Utc};

use ftb_exchange::{ExchangeError, Fill, TradeHistory};

/// Fetch the full fill history, deduplicated by fill id.
///
/// Terminates on an empty page (full history reached) or on a page that
/// yields no unseen id — the latter breaks the cycle when the upstream keeps
/// answering a stable, fully-overlapping tail for the same window.
///
/// Transport/auth errors from `source` propagate unmodified; retries belong
/// to the transport layer, not here.
pub async fn fetch_all_fills(
    source: &dyn TradeHistory,
    market: Option<&str>,
    page_limit: u32,
) -> Result<Vec<Fill>, ExchangeError> {
    let mut seen: BTreeMap<u64, Fill> = BTreeMap::new();
    let mut end_time = Utc::now();

    loop {
        let page = source.fills_before(market, end_time, page_limit).await?;
        let Some(oldest) = page.iter().map(|fill| fill.time).min() else {
            break;
        };

        let page_len = page.len();
        let mut fetched_new = false;
        for fill in page {
            if let Entry::Vacant(slot) = seen.entry(fill.id) {
                slot.insert(fill);
                fetched_new = true;
            }
        }
        tracing::debug!(
            page = page_len,
            total = seen.len(),
            until = %end_time,
            "fetched fills page"
        );

        end_time = oldest + Duration::seconds(1);
        if !fetched_new {
            break;
        }
    }

    Ok(seen.into_values().collect())
}
