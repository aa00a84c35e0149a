//! # lob-runner
//!
//! Main entry point for the order-book follower.
//!
//! Loads a JSON configuration file, starts one follower per configured
//! market, and logs top-of-book and trade activity until Ctrl+C.
//!
//! # Usage
//!
//! ```bash
//! lob-runner config.json --log-level info
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lob_core::Exchange;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Live order-book follower runner.
#[derive(Parser)]
#[command(name = "lob-runner", about = "Live order-book follower runner")]
struct Cli {
    /// Configuration file path (JSON).
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error). Overrides the config.
    #[arg(short, long)]
    log_level: Option<String>,

    /// Optional log directory for file output. Overrides the config.
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = lob_core::config::load_config(&cli.config)?;

    let log_level = cli
        .log_level
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| "info".to_owned());
    let log_dir = cli.log_dir.or_else(|| config.log_dir.clone());
    lob_core::logging::init_logging(&log_level, log_dir.as_deref(), "lob-runner");

    info!(
        "lob-runner starting — config={}, {} market(s)",
        cli.config.display(),
        config.markets.len(),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut follower_tasks = Vec::new();

    for market in &config.markets {
        match lob_md::registry::new_market_follower(*market, shutdown_rx.clone()) {
            Ok((book_rx, trade_rx, task)) => {
                info!("[{market}] follower started");
                follower_tasks.push(task);
                tokio::spawn(consume_books(*market, book_rx));
                tokio::spawn(consume_trades(*market, trade_rx));
            }
            Err(e) => {
                error!("[{market}] cannot start follower: {e}");
            }
        }
    }

    if follower_tasks.is_empty() {
        warn!("no followers running");
    }

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    let _ = shutdown_tx.send(true);
    for task in follower_tasks {
        let _ = task.await;
    }

    info!("all followers stopped — goodbye");
    Ok(())
}

async fn consume_books(market: Exchange, mut book_rx: tokio::sync::mpsc::Receiver<lob_core::OrderBook>) {
    while let Some(book) = book_rx.recv().await {
        if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
            info!(
                "[{market}] top of book {:.2} ({:.8}) / {:.2} ({:.8})",
                bid.price, bid.volume, ask.price, ask.volume,
            );
        }
    }
    warn!("[{market}] book stream closed");
}

async fn consume_trades(market: Exchange, mut trade_rx: tokio::sync::mpsc::Receiver<lob_core::Trade>) {
    while let Some(trade) = trade_rx.recv().await {
        info!(
            "[{market}] trade maker={:?} {:.8} @ {:.2}",
            trade.maker_side, trade.volume, trade.price,
        );
    }
    warn!("[{market}] trade stream closed");
}
