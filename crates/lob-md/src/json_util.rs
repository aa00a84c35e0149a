//! Shared JSON field extraction helpers for provider parsers.
//!
//! Exchanges encode numeric values as either JSON strings (`"30000.5"`) or
//! native numbers; decimal strings are parsed with `fast-float2`. Missing or
//! wrongly-shaped fields fail with `BadPayload`, unparseable numbers with
//! `Parse`.

use lob_core::{FeedError, Order};
use serde_json::Value;

/// Extract a required string field.
pub fn str_field<'a>(v: &'a Value, key: &str) -> Result<&'a str, FeedError> {
    v.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| FeedError::BadPayload(format!("missing string field '{key}'")))
}

/// Extract a required bool field.
pub fn bool_field(v: &Value, key: &str) -> Result<bool, FeedError> {
    v.get(key)
        .and_then(Value::as_bool)
        .ok_or_else(|| FeedError::BadPayload(format!("missing bool field '{key}'")))
}

/// Extract a required integer field.
pub fn u64_field(v: &Value, key: &str) -> Result<u64, FeedError> {
    v.get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| FeedError::BadPayload(format!("missing integer field '{key}'")))
}

/// Parse a JSON value (decimal string or number) as `f64`.
pub fn decimal(v: &Value) -> Result<f64, FeedError> {
    if let Some(s) = v.as_str() {
        fast_float2::parse(s).map_err(|_| FeedError::Parse(format!("bad decimal string '{s}'")))
    } else {
        v.as_f64()
            .ok_or_else(|| FeedError::BadPayload(format!("expected decimal, got {v}")))
    }
}

/// Extract a required decimal field (string or number).
pub fn f64_field(v: &Value, key: &str) -> Result<f64, FeedError> {
    let field = v
        .get(key)
        .ok_or_else(|| FeedError::BadPayload(format!("missing decimal field '{key}'")))?;
    decimal(field)
}

/// Parse one `[price, volume]` level into an [`Order`].
///
/// The level must be an array of exactly 2 elements.
pub fn parse_order(level: &Value) -> Result<Order, FeedError> {
    let raw = level
        .as_array()
        .ok_or_else(|| FeedError::BadPayload(format!("order level is not an array: {level}")))?;
    if raw.len() != 2 {
        return Err(FeedError::BadPayload(format!(
            "order level has {} elements, expected 2",
            raw.len()
        )));
    }
    Ok(Order { price: decimal(&raw[0])?, volume: decimal(&raw[1])? })
}

/// Extract a required array field of `[price, volume]` levels.
pub fn order_levels(v: &Value, key: &str) -> Result<Vec<Order>, FeedError> {
    v.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| FeedError::BadPayload(format!("missing level array '{key}'")))?
        .iter()
        .map(parse_order)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_accepts_strings_and_numbers() {
        assert_eq!(decimal(&serde_json::json!("10.50")).unwrap(), 10.50);
        assert_eq!(decimal(&serde_json::json!(10.50)).unwrap(), 10.50);
        assert!(decimal(&serde_json::json!("ten")).is_err());
        assert!(decimal(&serde_json::json!(true)).is_err());
    }

    #[test]
    fn order_requires_exactly_two_elements() {
        let order = parse_order(&serde_json::json!(["10.00", "1"])).unwrap();
        assert_eq!(order.price, 10.0);
        assert_eq!(order.volume, 1.0);

        assert!(parse_order(&serde_json::json!(["10.00"])).is_err());
        assert!(parse_order(&serde_json::json!(["10.00", "1", "extra"])).is_err());
        assert!(parse_order(&serde_json::json!("10.00")).is_err());
    }

    #[test]
    fn levels_field_must_exist() {
        let v = serde_json::json!({ "b": [["9.00", "2"]] });
        assert_eq!(order_levels(&v, "b").unwrap().len(), 1);
        assert!(order_levels(&v, "a").is_err());
    }
}
