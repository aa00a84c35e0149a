//! Market data structures — the values flowing out of a follower.
//!
//! # Timestamp convention
//!
//! All timestamps are in **microseconds since Unix epoch**. Exchanges send
//! event times in milliseconds; they are converted on decode (`E * 1000`).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Order — one price level
// ---------------------------------------------------------------------------

/// A single aggregated price level on one side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub price: f64,
    pub volume: f64,
}

// ---------------------------------------------------------------------------
// OrderBook
// ---------------------------------------------------------------------------

/// A full depth view of one market.
///
/// Bids are sorted **descending** by price (best bid first), asks sorted
/// **ascending** (best ask first). No side carries duplicate prices or
/// zero-volume levels. Values emitted by a follower are detached copies —
/// holding one never aliases the live book.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderBook {
    pub bids: Vec<Order>,
    pub asks: Vec<Order>,
    /// Event time of the last applied update, microseconds since epoch.
    pub timestamp_us: u64,
}

impl OrderBook {
    /// Best (highest) bid, if any.
    pub fn best_bid(&self) -> Option<Order> {
        self.bids.first().copied()
    }

    /// Best (lowest) ask, if any.
    pub fn best_ask(&self) -> Option<Order> {
        self.asks.first().copied()
    }

    /// Midpoint between best bid and best ask.
    ///
    /// Returns `None` when either side is empty.
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid.price + ask.price) / 2.0),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Trade
// ---------------------------------------------------------------------------

/// Which side of a trade was resting on the book when the aggressor arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarketSide {
    Buy,
    Sell,
    #[default]
    Unknown,
}

/// A single executed trade. Immutable once emitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub maker_side: MarketSide,
    pub price: f64,
    pub volume: f64,
    /// Event time, microseconds since epoch.
    pub timestamp_us: u64,
}
