//! Typed error definitions for the follower system.
//!
//! All variants implement `std::error::Error` via `thiserror`, so they
//! integrate with `anyhow::Result` at the application layer.
//!
//! A stale depth diff (one that ends at or before the current book sequence)
//! is deliberately *not* represented here — it is dropped internally and is
//! not an error.

use thiserror::Error;

use crate::types::{ApiProvider, Pair};

/// Domain-specific errors for the follower system.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Dial, read, or HTTP transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// JSON envelope or payload missing fields or of the wrong shape.
    #[error("bad payload: {0}")]
    BadPayload(String),

    /// Unparseable numeric string or token.
    #[error("parse error: {0}")]
    Parse(String),

    /// Depth diff sequence gap — the stream is desynchronized from the book.
    #[error("out of order update; expected update id {expected}, got {got}")]
    OutOfOrder { expected: u64, got: u64 },

    /// The requested pair has no follower on this provider.
    #[error("unsupported pair: {0}")]
    UnsupportedPair(Pair),

    /// The requested provider has no follower implementation.
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(ApiProvider),
}
