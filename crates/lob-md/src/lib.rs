//! # lob-md
//!
//! Market data follower modules.
//!
//! ## Architecture
//!
//! Each provider module exposes a `new_market_follower(pair, shutdown)`
//! factory that spawns one cooperative task per followed market. The task
//! owns the streaming connection, reconciles the incremental diff feed
//! against a one-shot REST snapshot, and emits detached order-book copies
//! and trades on two bounded output channels. Channel closure is the
//! termination signal; the returned join handle is the supervisor's
//! completion signal.
//!
//! ## Shared infrastructure
//!
//! - [`registry`] — provider dispatch from an [`Exchange`](lob_core::Exchange)
//! - [`json_util`] — JSON field extraction helpers

pub mod binance;
pub mod json_util;
pub mod registry;

use lob_core::{OrderBook, Trade};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Everything a follower factory hands back: the book stream, the trade
/// stream, and the join handle of the driver task.
pub type FollowerStreams = (mpsc::Receiver<OrderBook>, mpsc::Receiver<Trade>, JoinHandle<()>);
