//! Money calculation using rust_decimal for precision
//!
//! All price math runs on `Decimal` internally and converts to `f64` only at
//! the storage/serialization boundary, rounded half-up to two places.

mod calculator;

#[cfg(test)]
mod tests;

pub use calculator::{
    OrderTotals, PriceQuote, ShippingMethod, TAX_RATE_PERCENT, effective_price, order_totals,
    price_quote, round_money, to_decimal, to_f64,
};
