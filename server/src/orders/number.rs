//! Order number formatting
//!
//! `ORD-YYYYMMDD-NNNN`: date-scoped, zero-padded 4-digit sequence. The
//! sequence itself is allocated atomically by the order repository; this
//! module only formats and parses.

use chrono::{DateTime, Utc};

/// Prefix for all order numbers
pub const ORDER_NUMBER_PREFIX: &str = "ORD";

/// Day key used both in the number and as the counter record id
pub fn day_key(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d").to_string()
}

/// Build "ORD-YYYYMMDD-NNNN" from a day key and a 1-based sequence
pub fn format_order_number(day: &str, sequence: u32) -> String {
    format!("{ORDER_NUMBER_PREFIX}-{day}-{sequence:04}")
}

/// Parse the trailing sequence integer out of an order number, if it has the
/// expected shape
pub fn parse_sequence(order_number: &str) -> Option<u32> {
    let mut parts = order_number.splitn(3, '-');
    if parts.next() != Some(ORDER_NUMBER_PREFIX) {
        return None;
    }
    let day = parts.next()?;
    if day.len() != 8 || !day.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    parts.next()?.parse().ok()
}
