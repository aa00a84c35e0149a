//! Book state and diff reconciliation.
//!
//! The book is two sorted `Vec<Order>` sides with tolerance-based price
//! equality: incoming prices are decimal strings round-tripped through f64,
//! so exact comparison is unreliable. A batch of level updates is applied
//! with a linear scan per update and a single sort per side at the end,
//! O(U·N + N log N) for N ≤ ~5000 levels.
//!
//! [`InternalBook`] holds the synchronization invariant between the REST
//! snapshot and the diff stream: stale diffs are dropped, sequence gaps
//! surface as [`FeedError::OutOfOrder`], and `last_update_id` never
//! decreases once initialized.

use lob_core::{FeedError, Order, OrderBook, time_util};

use super::json_parser::DepthDiff;
use super::{PRICE_PRECISION, VOLUME_PRECISION};

#[inline]
fn prices_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < PRICE_PRECISION / 2.0
}

#[inline]
fn has_zero_volume(volume: f64) -> bool {
    volume.abs() < VOLUME_PRECISION / 2.0
}

/// Apply a batch of level updates to one side of the book.
///
/// For each update: an existing level at the same price (within tolerance)
/// has its volume overwritten, and is swap-removed if the new volume is
/// zero; an unknown non-zero level is appended; an unknown zero level is
/// ignored. Ordering is not maintained here — the caller re-sorts the side
/// once the whole batch is in.
pub fn apply_updates(side: &mut Vec<Order>, updates: &[Order]) {
    for update in updates {
        let found = side.iter().position(|level| prices_equal(level.price, update.price));

        match found {
            Some(i) => {
                side[i].volume = update.volume;
                if has_zero_volume(side[i].volume) {
                    side.swap_remove(i);
                }
            }
            None => {
                if !has_zero_volume(update.volume) {
                    side.push(*update);
                }
            }
        }
    }
}

fn sort_bids(bids: &mut [Order]) {
    bids.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(std::cmp::Ordering::Equal));
}

fn sort_asks(asks: &mut [Order]) {
    asks.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal));
}

// ---------------------------------------------------------------------------
// InternalBook — snapshot + sequence state
// ---------------------------------------------------------------------------

/// The follower's private book: the public [`OrderBook`] plus the sequence
/// id up to which it is current.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalBook {
    pub book: OrderBook,
    pub last_update_id: u64,
}

impl InternalBook {
    /// Build a book from snapshot levels. Both sides are sorted.
    pub fn from_snapshot(bids: Vec<Order>, asks: Vec<Order>, last_update_id: u64) -> Self {
        let mut internal = Self {
            book: OrderBook { bids, asks, timestamp_us: 0 },
            last_update_id,
        };
        sort_bids(&mut internal.book.bids);
        sort_asks(&mut internal.book.asks);
        internal
    }

    /// Reconcile one depth diff against the book.
    ///
    /// - A diff ending at or before `last_update_id` is stale: dropped
    ///   silently, `Ok(false)`, book untouched.
    /// - A diff starting past `last_update_id + 1` means the stream skipped
    ///   updates: `Err(OutOfOrder)`, the caller must treat the stream as
    ///   desynchronized. The first diff after a snapshot may begin earlier
    ///   (the venue promises `U <= snapshot_id + 1 <= u` for it), which this
    ///   check admits.
    /// - Otherwise the diff is applied, both sides re-sorted, and the book
    ///   advances to `u` / the diff's event time. `Ok(true)`.
    pub fn apply_diff(&mut self, diff: &DepthDiff) -> Result<bool, FeedError> {
        if diff.last_update_id <= self.last_update_id {
            return Ok(false);
        }

        if diff.first_update_id > self.last_update_id + 1 {
            return Err(FeedError::OutOfOrder {
                expected: self.last_update_id + 1,
                got: diff.first_update_id,
            });
        }

        apply_updates(&mut self.book.bids, &diff.bid_updates);
        apply_updates(&mut self.book.asks, &diff.ask_updates);
        sort_bids(&mut self.book.bids);
        sort_asks(&mut self.book.asks);

        self.last_update_id = diff.last_update_id;
        self.book.timestamp_us = time_util::us_from_ms(diff.event_time_ms);

        Ok(true)
    }
}
