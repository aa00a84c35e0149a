//! REST depth snapshot — the book's starting point.
//!
//! One GET against `/api/v3/depth` with a 1000-level limit per side. No
//! retry at this layer; a failed snapshot terminates the follower and the
//! supervisor decides whether to start a new one.

use lob_core::{FeedError, Pair};
use serde_json::Value;

use super::book::InternalBook;
use super::{REST_BASE_URL, SNAPSHOT_DEPTH_LIMIT};
use crate::json_util::{order_levels, u64_field};

/// Fetch and parse the current depth snapshot for `pair`.
pub async fn fetch_snapshot(http: &reqwest::Client, pair: Pair) -> Result<InternalBook, FeedError> {
    let url = format!("{REST_BASE_URL}/api/v3/depth");
    let limit = SNAPSHOT_DEPTH_LIMIT.to_string();

    let body = http
        .get(&url)
        .query(&[("symbol", pair.symbol()), ("limit", limit.as_str())])
        .send()
        .await
        .map_err(|e| FeedError::Network(format!("depth snapshot request failed: {e}")))?
        .error_for_status()
        .map_err(|e| FeedError::Network(format!("depth snapshot http error: {e}")))?
        .text()
        .await
        .map_err(|e| FeedError::Network(format!("depth snapshot body read failed: {e}")))?;

    parse_snapshot(&body)
}

/// Parse a depth snapshot body into a sorted [`InternalBook`].
pub(crate) fn parse_snapshot(body: &str) -> Result<InternalBook, FeedError> {
    let v: Value = serde_json::from_str(body)
        .map_err(|e| FeedError::BadPayload(format!("invalid snapshot json: {e}")))?;

    let last_update_id = u64_field(&v, "lastUpdateId")?;
    let bids = order_levels(&v, "bids")?;
    let asks = order_levels(&v, "asks")?;

    Ok(InternalBook::from_snapshot(bids, asks, last_update_id))
}
