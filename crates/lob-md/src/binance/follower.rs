//! Follower driver — owns the stream connection and pumps messages.
//!
//! One cooperative task per followed market:
//!
//! 1. Fetch the REST snapshot (failure closes both outputs immediately).
//! 2. Dial the combined `@depth`/`@trade` stream; redial whenever the
//!    connection is older than [`WS_LIFETIME`](super::WS_LIFETIME) to
//!    pre-empt the venue's 60-minute hard cut.
//! 3. Read, decode, reconcile, emit. Every applied (or stale) diff emits a
//!    detached copy of the book; every trade is forwarded in receipt order.
//!    No ordering holds *between* the two output streams.
//! 4. Any read, decode, or sequence error logs a diagnostic and terminates;
//!    consumers observe termination as channel closure. Cancellation is
//!    checked between messages — an in-flight read is not interrupted.

use std::time::Instant;

use futures_util::{SinkExt, StreamExt};
use lob_core::{FeedError, OrderBook, Pair, Trade};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use super::book::InternalBook;
use super::{CHANNEL_CAPACITY, WS_BASE_URL, WS_LIFETIME, json_parser, snapshot};
use crate::FollowerStreams;

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Spawn the driver task and hand back its output streams.
pub(crate) fn spawn(pair: Pair, shutdown_rx: watch::Receiver<bool>) -> FollowerStreams {
    let (book_tx, book_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (trade_tx, trade_rx) = mpsc::channel(CHANNEL_CAPACITY);

    let task = tokio::spawn(follow_loop(pair, book_tx, trade_tx, shutdown_rx));

    (book_rx, trade_rx, task)
}

/// Combined-stream URL for one pair.
///
/// Built by string formatting — the two stream names are fixed tokens, and
/// percent-encoding the `/` separator breaks the venue's handshake.
fn stream_url(pair: Pair) -> String {
    format!("{WS_BASE_URL}?streams={0}@depth/{0}@trade", pair.token())
}

async fn connect(url: &str) -> Result<WsStream, FeedError> {
    let (stream, _response) = tokio_tungstenite::connect_async(url)
        .await
        .map_err(|e| FeedError::Network(format!("stream dial failed: {e}")))?;
    Ok(stream)
}

/// What one decoded text frame asks the driver to do.
#[derive(Debug, PartialEq)]
enum Dispatch {
    /// A diff was reconciled (or dropped as stale); emit this book copy.
    Book(OrderBook),
    /// A trade was decoded; emit it.
    Trade(Trade),
    /// Message belongs to neither followed stream.
    Ignored,
}

/// Decode one text frame and reconcile it against the book.
///
/// Pure apart from the book mutation — connection and channel handling stay
/// in [`follow_loop`], which keeps this dispatch logic testable.
fn dispatch_text(
    book: &mut InternalBook,
    depth_stream: &str,
    trade_stream: &str,
    text: &str,
) -> Result<Dispatch, FeedError> {
    let envelope = json_parser::parse_envelope(text)?;

    if envelope.stream == depth_stream {
        let diff = json_parser::parse_depth_diff(&envelope.data)?;
        if !book.apply_diff(&diff)? {
            debug!("stale diff u={} dropped", diff.last_update_id);
        }
        Ok(Dispatch::Book(book.book.clone()))
    } else if envelope.stream == trade_stream {
        Ok(Dispatch::Trade(json_parser::parse_trade(&envelope.data)?))
    } else {
        Ok(Dispatch::Ignored)
    }
}

/// The driver loop. Returning drops both senders, which closes the output
/// streams — that closure *is* the termination signal.
async fn follow_loop(
    pair: Pair,
    book_tx: mpsc::Sender<OrderBook>,
    trade_tx: mpsc::Sender<Trade>,
    shutdown_rx: watch::Receiver<bool>,
) {
    let depth_stream = format!("{}@depth", pair.token());
    let trade_stream = format!("{}@trade", pair.token());
    let url = stream_url(pair);

    let http = reqwest::Client::new();
    let mut book = match snapshot::fetch_snapshot(&http, pair).await {
        Ok(book) => book,
        Err(e) => {
            error!("[{pair}] follower error: {e}");
            return;
        }
    };
    info!(
        "[{pair}] snapshot loaded — {} bids / {} asks, update id {}",
        book.book.bids.len(),
        book.book.asks.len(),
        book.last_update_id,
    );

    let mut conn = match connect(&url).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("[{pair}] follower error: {e}");
            return;
        }
    };
    let mut opened_at = Instant::now();
    info!("[{pair}] stream connected");

    loop {
        if opened_at.elapsed() >= WS_LIFETIME {
            info!("[{pair}] rotating stream connection");
            let _ = conn.close(None).await;
            conn = match connect(&url).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("[{pair}] follower error: {e}");
                    return;
                }
            };
            opened_at = Instant::now();
        }

        let msg = match conn.next().await {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                error!("[{pair}] read error: {e}");
                break;
            }
            None => {
                warn!("[{pair}] stream ended");
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                match dispatch_text(&mut book, &depth_stream, &trade_stream, text.as_str()) {
                    Ok(Dispatch::Book(copy)) => {
                        if book_tx.send(copy).await.is_err() {
                            debug!("[{pair}] book consumer gone");
                            break;
                        }
                    }
                    Ok(Dispatch::Trade(trade)) => {
                        if trade_tx.send(trade).await.is_err() {
                            debug!("[{pair}] trade consumer gone");
                            break;
                        }
                    }
                    Ok(Dispatch::Ignored) => {}
                    Err(e) => {
                        error!("[{pair}] follower error: {e}");
                        break;
                    }
                }
            }
            Message::Ping(payload) => {
                let _ = conn.send(Message::Pong(payload)).await;
            }
            Message::Close(_) => {
                warn!("[{pair}] received close frame");
                break;
            }
            _ => {}
        }

        if *shutdown_rx.borrow() {
            info!("[{pair}] shutdown requested");
            break;
        }
    }

    let _ = conn.close(None).await;
}

#[cfg(test)]
mod tests {
    use lob_core::{MarketSide, Order};

    use super::super::snapshot::parse_snapshot;
    use super::*;

    const DEPTH: &str = "btceur@depth";
    const TRADES: &str = "btceur@trade";

    fn sample_book() -> InternalBook {
        parse_snapshot(
            r#"{
                "lastUpdateId": 100,
                "bids": [["10.00", "1"], ["9.00", "2"]],
                "asks": [["11.00", "1"]]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn combined_stream_url() {
        assert_eq!(
            stream_url(Pair::Btceur),
            "wss://stream.binance.com:9443/stream?streams=btceur@depth/btceur@trade"
        );
    }

    #[test]
    fn depth_frame_reconciles_and_emits_a_copy() {
        let mut book = sample_book();
        let text = concat!(
            r#"{"stream":"btceur@depth","data":"#,
            r#"{"e":"depthUpdate","E":1700000000000,"U":101,"u":101,"#,
            r#""b":[["9.00","0"]],"a":[["12.00","3"]]}}"#
        );

        let dispatch = dispatch_text(&mut book, DEPTH, TRADES, text).unwrap();
        let Dispatch::Book(copy) = dispatch else { panic!("expected a book") };

        assert_eq!(copy.bids, vec![Order { price: 10.0, volume: 1.0 }]);
        assert_eq!(
            copy.asks,
            vec![Order { price: 11.0, volume: 1.0 }, Order { price: 12.0, volume: 3.0 }]
        );
        assert_eq!(book.last_update_id, 101);

        // The emitted book is detached from the live one.
        let text = concat!(
            r#"{"stream":"btceur@depth","data":"#,
            r#"{"e":"depthUpdate","E":1700000000001,"U":102,"u":102,"#,
            r#""b":[["10.00","0"]],"a":[]}}"#
        );
        dispatch_text(&mut book, DEPTH, TRADES, text).unwrap();
        assert_eq!(copy.bids, vec![Order { price: 10.0, volume: 1.0 }]);
        assert!(book.book.bids.is_empty());
    }

    #[test]
    fn stale_depth_frame_still_emits_unchanged_book() {
        let mut book = sample_book();
        let before = book.book.clone();
        let text = concat!(
            r#"{"stream":"btceur@depth","data":"#,
            r#"{"e":"depthUpdate","E":1700000000000,"U":50,"u":90,"#,
            r#""b":[["1.00","1"]],"a":[]}}"#
        );

        let dispatch = dispatch_text(&mut book, DEPTH, TRADES, text).unwrap();
        assert_eq!(dispatch, Dispatch::Book(before));
        assert_eq!(book.last_update_id, 100);
    }

    #[test]
    fn gap_surfaces_out_of_order() {
        let mut book = sample_book();
        let text = concat!(
            r#"{"stream":"btceur@depth","data":"#,
            r#"{"e":"depthUpdate","E":1700000000000,"U":105,"u":106,"b":[],"a":[]}}"#
        );

        match dispatch_text(&mut book, DEPTH, TRADES, text) {
            Err(FeedError::OutOfOrder { expected: 101, got: 105 }) => {}
            other => panic!("expected OutOfOrder, got {other:?}"),
        }
    }

    #[test]
    fn trade_frame_decodes() {
        let mut book = sample_book();
        let text = concat!(
            r#"{"stream":"btceur@trade","data":"#,
            r#"{"e":"trade","p":"10.50","q":"0.25","m":true,"E":1700000000000,"M":true}}"#
        );

        let dispatch = dispatch_text(&mut book, DEPTH, TRADES, text).unwrap();
        let Dispatch::Trade(trade) = dispatch else { panic!("expected a trade") };
        assert_eq!(trade.maker_side, MarketSide::Buy);
        assert_eq!(trade.price, 10.50);
        assert_eq!(trade.volume, 0.25);
    }

    #[test]
    fn foreign_stream_tags_are_ignored() {
        let mut book = sample_book();
        let text = r#"{"stream":"btceur@kline_1m","data":{"whatever":1}}"#;
        assert_eq!(dispatch_text(&mut book, DEPTH, TRADES, text).unwrap(), Dispatch::Ignored);
        assert_eq!(book, sample_book());
    }
}
