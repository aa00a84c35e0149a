//! Configuration parsing for the follower runner.
//!
//! The runner reads its settings from a single JSON file: logging metadata
//! plus a `markets` array naming the exchanges to follow.
//!
//! # Example config
//!
//! ```json
//! {
//!   "log_level": "info",
//!   "log_dir": "/tmp/lob",
//!   "markets": [
//!     { "provider": "binance", "pair": "btceur" }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::types::Exchange;

/// Top-level application config, deserialized from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Default log level if `RUST_LOG` is not set.
    pub log_level: Option<String>,

    /// Optional directory for daily-rotating log files.
    pub log_dir: Option<String>,

    /// Markets to follow — one follower instance is started per entry.
    pub markets: Vec<Exchange>,
}

/// Load and parse a JSON config file.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config: AppConfig =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}
