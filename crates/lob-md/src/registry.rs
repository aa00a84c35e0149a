//! Follower registry — routes an [`Exchange`] to its provider module.

use lob_core::{ApiProvider, Exchange, FeedError};
use tokio::sync::watch;

use crate::{FollowerStreams, binance};

/// Create a market follower for one exchange.
///
/// Dispatch over [`ApiProvider`] is exhaustive: providers without a follower
/// implementation are rejected synchronously with `UnsupportedProvider`, and
/// a new provider variant will not compile until it is routed here.
pub fn new_market_follower(
    exchange: Exchange,
    shutdown_rx: watch::Receiver<bool>,
) -> Result<FollowerStreams, FeedError> {
    match exchange.provider {
        ApiProvider::Binance => binance::new_market_follower(exchange.pair, shutdown_rx),
        provider @ (ApiProvider::Luno | ApiProvider::DummyExchange) => {
            Err(FeedError::UnsupportedProvider(provider))
        }
    }
}
