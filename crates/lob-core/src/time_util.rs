//! Epoch-microsecond time utilities.
//!
//! The whole system carries timestamps as `u64` microseconds since the Unix
//! epoch. Exchange event times arrive in milliseconds and are widened on
//! decode.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as **microseconds** since Unix epoch.
#[inline]
pub fn now_us() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as u64
}

/// Widen an exchange millisecond timestamp to microseconds.
#[inline]
pub fn us_from_ms(ms: u64) -> u64 {
    ms * 1_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widens_milliseconds() {
        // 2023-11-14T22:13:20Z
        assert_eq!(us_from_ms(1_700_000_000_000), 1_700_000_000_000_000);
    }

    #[test]
    fn now_is_past_2020() {
        assert!(now_us() > 1_577_836_800_000_000);
    }
}
