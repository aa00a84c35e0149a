//! Binance market data — live order-book follower.
//!
//! The follower reconciles a one-shot REST depth snapshot with the
//! incremental `@depth` diff stream, and forwards `@trade` executions
//! alongside. One cooperative task per followed market; no resync within an
//! instance — the supervisor restarts a fresh follower to recover.

pub mod book;
pub mod follower;
pub mod json_parser;
pub mod snapshot;

use std::time::Duration;

use lob_core::{FeedError, Pair};
use tokio::sync::watch;

use crate::FollowerStreams;

pub(crate) const REST_BASE_URL: &str = "https://api.binance.com";
pub(crate) const WS_BASE_URL: &str = "wss://stream.binance.com:9443/stream";

/// Price tolerance for this venue — levels closer than half of this merge.
pub const PRICE_PRECISION: f64 = 0.01;

/// Volume tolerance — below half of this a level counts as removed.
pub const VOLUME_PRECISION: f64 = 1e-8;

/// Redial margin below the venue's 60-minute connection hard cut.
pub const WS_LIFETIME: Duration = Duration::from_secs(55 * 60);

/// Depth levels requested per side in the REST snapshot.
pub const SNAPSHOT_DEPTH_LIMIT: u32 = 1000;

/// Output channel capacity — slow consumers backpressure the stream reader
/// rather than dropping messages.
pub const CHANNEL_CAPACITY: usize = 1;

/// Start following one Binance market.
///
/// Returns the book and trade streams immediately; the follower task runs
/// asynchronously and signals termination by closing both streams. The
/// join handle completes when the task has fully wound down.
///
/// Only [`Pair::Btceur`] is supported; any other pair is rejected
/// synchronously with [`FeedError::UnsupportedPair`] and no task is started.
pub fn new_market_follower(
    pair: Pair,
    shutdown_rx: watch::Receiver<bool>,
) -> Result<FollowerStreams, FeedError> {
    if pair != Pair::Btceur {
        return Err(FeedError::UnsupportedPair(pair));
    }

    Ok(follower::spawn(pair, shutdown_rx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsupported_pairs() {
        let (_tx, rx) = watch::channel(false);
        match new_market_follower(Pair::Ltcbtc, rx) {
            Err(FeedError::UnsupportedPair(pair)) => assert_eq!(pair, Pair::Ltcbtc),
            other => panic!("expected UnsupportedPair, got {other:?}"),
        }
    }
}
