//! # lob-core
//!
//! Core crate for the order-book follower system, providing:
//!
//! - **Types** (`types`) — provider/pair enums, order book and trade structs
//! - **Configuration** (`config`) — JSON config deserialization
//! - **Error types** (`error`) — domain-specific `FeedError` via thiserror
//! - **Time utilities** (`time_util`) — epoch-microsecond timestamps
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod config;
pub mod error;
pub mod logging;
pub mod time_util;
pub mod types;

pub use error::FeedError;
// Re-export types at crate root for convenience.
pub use types::*;
