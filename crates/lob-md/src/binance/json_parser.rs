//! Binance stream message decoding.
//!
//! The combined stream multiplexes `@depth` diffs and `@trade` executions
//! inside a `{"stream": ..., "data": ...}` envelope. Decoding is pure — no
//! book state is touched here. Missing fields and malformed shapes fail
//! with `BadPayload`, unparseable numbers with `Parse`.

use lob_core::{FeedError, MarketSide, Order, Trade, time_util};
use serde_json::Value;

use crate::json_util::{bool_field, f64_field, order_levels, str_field, u64_field};

/// The outer `{stream, data}` envelope of a combined-stream message.
#[derive(Debug)]
pub struct Envelope {
    pub stream: String,
    pub data: Value,
}

/// Split a raw message into its stream tag and data payload.
pub fn parse_envelope(text: &str) -> Result<Envelope, FeedError> {
    let v: Value = serde_json::from_str(text)
        .map_err(|e| FeedError::BadPayload(format!("invalid json envelope: {e}")))?;

    let stream = str_field(&v, "stream")?.to_owned();
    let data = v
        .get("data")
        .cloned()
        .ok_or_else(|| FeedError::BadPayload("missing 'data' payload".to_owned()))?;

    Ok(Envelope { stream, data })
}

// ---------------------------------------------------------------------------
// Depth diff
// ---------------------------------------------------------------------------

/// One incremental depth update covering sequence ids `U..=u`.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthDiff {
    pub first_update_id: u64,
    pub last_update_id: u64,
    pub bid_updates: Vec<Order>,
    pub ask_updates: Vec<Order>,
    /// Venue event time, milliseconds since epoch.
    pub event_time_ms: u64,
}

/// Decode a `@depth` diff payload.
pub fn parse_depth_diff(data: &Value) -> Result<DepthDiff, FeedError> {
    Ok(DepthDiff {
        first_update_id: u64_field(data, "U")?,
        last_update_id: u64_field(data, "u")?,
        bid_updates: order_levels(data, "b")?,
        ask_updates: order_levels(data, "a")?,
        event_time_ms: u64_field(data, "E")?,
    })
}

// ---------------------------------------------------------------------------
// Trade
// ---------------------------------------------------------------------------

/// Decode a `@trade` execution payload.
///
/// `m` reports whether the buyer was the resting (maker) side.
pub fn parse_trade(data: &Value) -> Result<Trade, FeedError> {
    let buyer_is_maker = bool_field(data, "m")?;
    let maker_side = if buyer_is_maker { MarketSide::Buy } else { MarketSide::Sell };

    Ok(Trade {
        maker_side,
        price: f64_field(data, "p")?,
        volume: f64_field(data, "q")?,
        timestamp_us: time_util::us_from_ms(u64_field(data, "E")?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_splits_stream_and_data() {
        let text = r#"{"stream":"btceur@depth","data":{"U":101,"u":101,"b":[],"a":[],"E":0,"e":"depthUpdate"}}"#;
        let envelope = parse_envelope(text).unwrap();
        assert_eq!(envelope.stream, "btceur@depth");
        assert_eq!(envelope.data["u"], 101);
    }

    #[test]
    fn envelope_requires_both_fields() {
        assert!(parse_envelope(r#"{"data":{}}"#).is_err());
        assert!(parse_envelope(r#"{"stream":"btceur@depth"}"#).is_err());
        assert!(parse_envelope("not json").is_err());
    }

    #[test]
    fn decode_depth_diff() {
        let data = serde_json::json!({
            "e": "depthUpdate",
            "E": 1_700_000_000_000u64,
            "U": 101,
            "u": 103,
            "b": [["9.00", "0"], ["9.50", "1.25"]],
            "a": [["12.00", "3"]]
        });
        let diff = parse_depth_diff(&data).unwrap();
        assert_eq!(diff.first_update_id, 101);
        assert_eq!(diff.last_update_id, 103);
        assert_eq!(diff.bid_updates.len(), 2);
        assert_eq!(diff.bid_updates[0], Order { price: 9.0, volume: 0.0 });
        assert_eq!(diff.ask_updates, vec![Order { price: 12.0, volume: 3.0 }]);
        assert_eq!(diff.event_time_ms, 1_700_000_000_000);
    }

    #[test]
    fn depth_diff_missing_ids_is_bad_payload() {
        let data = serde_json::json!({ "b": [], "a": [], "E": 0 });
        match parse_depth_diff(&data) {
            Err(FeedError::BadPayload(_)) => {}
            other => panic!("expected BadPayload, got {other:?}"),
        }
    }

    #[test]
    fn depth_diff_bad_level_is_rejected() {
        let data = serde_json::json!({
            "U": 1, "u": 1, "E": 0,
            "b": [["9.00", "1", "extra"]],
            "a": []
        });
        assert!(parse_depth_diff(&data).is_err());
    }

    #[test]
    fn decode_trade_maker_sides() {
        let data = serde_json::json!({
            "e": "trade",
            "p": "10.50",
            "q": "0.25",
            "m": true,
            "E": 1_700_000_000_000u64,
            "M": true
        });
        let trade = parse_trade(&data).unwrap();
        assert_eq!(trade.maker_side, MarketSide::Buy);
        assert_eq!(trade.price, 10.50);
        assert_eq!(trade.volume, 0.25);
        // 2023-11-14T22:13:20Z
        assert_eq!(trade.timestamp_us, 1_700_000_000_000_000);

        let data = serde_json::json!({ "p": "10.50", "q": "0.25", "m": false, "E": 0u64 });
        assert_eq!(parse_trade(&data).unwrap().maker_side, MarketSide::Sell);
    }

    #[test]
    fn trade_with_bad_price_is_a_parse_error() {
        let data = serde_json::json!({ "p": "ten", "q": "0.25", "m": true, "E": 0u64 });
        match parse_trade(&data) {
            Err(FeedError::Parse(_)) => {}
            other => panic!("expected Parse, got {other:?}"),
        }
    }
}
