//! Price calculator
//!
//! effective price → shipping → tax (18% on price + shipping) → total.
//! The displayed discount is base − offer while the offer is live.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Rounding: 2 decimal places, half-up
const DECIMAL_PLACES: u32 = 2;

/// Flat tax applied on (effective price + shipping)
pub const TAX_RATE_PERCENT: i64 = 18;

/// Convert an f64 monetary value to Decimal
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Convert a Decimal back to f64 for storage/serialization
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or(0.0)
}

/// Round to 2 places, midpoint away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Shipping tiers with fixed charges
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ShippingMethod {
    Standard,
    Express,
    NextDay,
}

impl ShippingMethod {
    /// Fixed charge lookup: {standard: 0, express: 99, next-day: 199}
    pub fn cost(&self) -> Decimal {
        match self {
            ShippingMethod::Standard => Decimal::ZERO,
            ShippingMethod::Express => Decimal::from(99),
            ShippingMethod::NextDay => Decimal::from(199),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "standard",
            ShippingMethod::Express => "express",
            ShippingMethod::NextDay => "next-day",
        }
    }
}

/// Order-level money snapshot shared by checkout and order creation
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping_charges: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

/// Tax is 18% of (subtotal + shipping); total is their sum.
pub fn order_totals(subtotal: Decimal, shipping: ShippingMethod) -> OrderTotals {
    let shipping_charges = shipping.cost();
    let tax_rate = Decimal::new(TAX_RATE_PERCENT, 2);
    let tax_amount = round_money((subtotal + shipping_charges) * tax_rate);
    let total_amount = subtotal + shipping_charges + tax_amount;
    OrderTotals {
        subtotal,
        shipping_charges,
        tax_amount,
        total_amount,
    }
}

/// Computed breakdown for one purchasable unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub effective_price: f64,
    pub shipping_cost: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    /// base − offer while the offer is live, otherwise 0
    pub discount: f64,
}

/// Offer price takes effect only when strictly lower than base price;
/// a style surcharge is added on top of whichever price wins.
pub fn effective_price(
    base_price: Decimal,
    offer_price: Option<Decimal>,
    style_additional: Option<Decimal>,
) -> Decimal {
    let price = match offer_price {
        Some(offer) if offer < base_price => offer,
        _ => base_price,
    };
    price + style_additional.unwrap_or(Decimal::ZERO)
}

/// Full quote: effective price, shipping, 18% tax on price+shipping, total.
pub fn price_quote(
    base_price: f64,
    offer_price: Option<f64>,
    style_additional: Option<f64>,
    shipping: ShippingMethod,
) -> PriceQuote {
    let base = to_decimal(base_price);
    let offer = offer_price.map(to_decimal);
    let effective = effective_price(base, offer, style_additional.map(to_decimal));
    let totals = order_totals(effective, shipping);

    let discount = match offer {
        Some(o) if o < base => base - o,
        _ => Decimal::ZERO,
    };

    PriceQuote {
        effective_price: to_f64(effective),
        shipping_cost: to_f64(totals.shipping_charges),
        tax_amount: to_f64(totals.tax_amount),
        total_amount: to_f64(totals.total_amount),
        discount: to_f64(discount),
    }
}
