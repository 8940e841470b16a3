use super::*;
use rust_decimal::Decimal;

#[test]
fn test_to_decimal_precision() {
    // Classic floating point problem: 0.1 + 0.2 != 0.3
    let a = 0.1_f64;
    let b = 0.2_f64;
    let sum_f64 = a + b;

    // f64 fails
    assert_ne!(sum_f64, 0.3);

    // Decimal succeeds
    let sum_dec = to_decimal(a) + to_decimal(b);
    assert_eq!(to_f64(sum_dec), 0.3);
}

#[test]
fn test_offer_only_applies_when_lower() {
    // basePrice=1000, offerPrice=1200 → effective price is 1000, not 1200
    let eff = effective_price(Decimal::from(1000), Some(Decimal::from(1200)), None);
    assert_eq!(eff, Decimal::from(1000));

    let eff = effective_price(Decimal::from(1000), Some(Decimal::from(800)), None);
    assert_eq!(eff, Decimal::from(800));

    // equal offer does not win either (strictly lower)
    let eff = effective_price(Decimal::from(1000), Some(Decimal::from(1000)), None);
    assert_eq!(eff, Decimal::from(1000));
}

#[test]
fn test_golden_quote() {
    // base 500, offer 400, style +50, express(99)
    // → effective 450, shipping 99, tax (450+99)*0.18 = 98.82, total 647.82
    let quote = price_quote(500.0, Some(400.0), Some(50.0), ShippingMethod::Express);
    assert_eq!(quote.effective_price, 450.0);
    assert_eq!(quote.shipping_cost, 99.0);
    assert_eq!(quote.tax_amount, 98.82);
    assert_eq!(quote.total_amount, 647.82);
    assert_eq!(quote.discount, 100.0);
}

#[test]
fn test_order_totals_match_quote_math() {
    // multi-item subtotal goes through the same 18% rule as a single quote
    let totals = order_totals(Decimal::from(1499), ShippingMethod::Express);
    assert_eq!(to_f64(totals.shipping_charges), 99.0);
    assert_eq!(to_f64(totals.tax_amount), 287.64); // (1499 + 99) * 0.18
    assert_eq!(to_f64(totals.total_amount), 1885.64);

    let quote = price_quote(1499.0, None, None, ShippingMethod::Express);
    assert_eq!(quote.tax_amount, to_f64(totals.tax_amount));
    assert_eq!(quote.total_amount, to_f64(totals.total_amount));
}

#[test]
fn test_standard_shipping_is_free() {
    let quote = price_quote(100.0, None, None, ShippingMethod::Standard);
    assert_eq!(quote.shipping_cost, 0.0);
    assert_eq!(quote.tax_amount, 18.0);
    assert_eq!(quote.total_amount, 118.0);
    assert_eq!(quote.discount, 0.0);
}

#[test]
fn test_tax_is_on_price_plus_shipping() {
    // Tax base must include the shipping charge, not price alone
    let quote = price_quote(100.0, None, None, ShippingMethod::NextDay);
    assert_eq!(quote.tax_amount, 53.82); // (100 + 199) * 0.18
    assert_eq!(quote.total_amount, 352.82);
}

#[test]
fn test_no_discount_for_ineffective_offer() {
    let quote = price_quote(1000.0, Some(1200.0), None, ShippingMethod::Standard);
    assert_eq!(quote.effective_price, 1000.0);
    assert_eq!(quote.discount, 0.0);
}

#[test]
fn test_fractional_tax_rounds_half_up() {
    // (10.25 + 0) * 0.18 = 1.845 → 1.85 under half-up rounding
    let quote = price_quote(10.25, None, None, ShippingMethod::Standard);
    assert_eq!(quote.tax_amount, 1.85);
    assert_eq!(quote.total_amount, 12.10);
}
