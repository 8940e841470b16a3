//! Cart store
//!
//! Explicit cart state as pure functions over an immutable item list: every
//! operation returns a new `Cart`, no hidden singletons. The whole state is
//! serializable so the client can persist a snapshot between visits.

use crate::pricing::{to_decimal, to_f64};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart line. Lines are identified by (product_id, size, style): the
/// same product in a different size or style is a separate line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub title: String,
    pub sku: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub size: Option<String>,
    pub style: Option<String>,
    pub image: String,
}

impl CartItem {
    fn same_line(&self, other: &CartItem) -> bool {
        self.product_id == other.product_id
            && self.size == other.size
            && self.style == other.style
    }
}

/// Immutable cart snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item; an existing matching line absorbs the quantity instead
    /// of duplicating
    pub fn add(&self, item: CartItem) -> Cart {
        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.same_line(&item)) {
            Some(existing) => existing.quantity += item.quantity,
            None => items.push(item),
        }
        Cart { items }
    }

    /// Remove a line entirely
    pub fn remove(&self, product_id: &str, size: Option<&str>, style: Option<&str>) -> Cart {
        let items = self
            .items
            .iter()
            .filter(|i| {
                !(i.product_id == product_id
                    && i.size.as_deref() == size
                    && i.style.as_deref() == style)
            })
            .cloned()
            .collect();
        Cart { items }
    }

    /// Set a line's quantity; zero or negative removes the line
    pub fn update_quantity(
        &self,
        product_id: &str,
        size: Option<&str>,
        style: Option<&str>,
        quantity: i32,
    ) -> Cart {
        if quantity <= 0 {
            return self.remove(product_id, size, style);
        }
        let items = self
            .items
            .iter()
            .map(|i| {
                if i.product_id == product_id
                    && i.size.as_deref() == size
                    && i.style.as_deref() == style
                {
                    let mut updated = i.clone();
                    updated.quantity = quantity;
                    updated
                } else {
                    i.clone()
                }
            })
            .collect();
        Cart { items }
    }

    pub fn clear(&self) -> Cart {
        Cart::new()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total unit count across all lines
    pub fn total_items(&self) -> i32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals, computed in Decimal
    pub fn subtotal(&self) -> f64 {
        let sum: Decimal = self
            .items
            .iter()
            .map(|i| to_decimal(i.unit_price) * Decimal::from(i.quantity))
            .sum();
        to_f64(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, size: Option<&str>, price: f64, quantity: i32) -> CartItem {
        CartItem {
            product_id: product_id.to_string(),
            title: "Classic Oak Frame".to_string(),
            sku: format!("SKU-{product_id}"),
            unit_price: price,
            quantity,
            size: size.map(|s| s.to_string()),
            style: None,
            image: String::new(),
        }
    }

    #[test]
    fn test_add_merges_matching_lines() {
        let cart = Cart::new()
            .add(item("p1", Some("8x10"), 499.0, 1))
            .add(item("p1", Some("8x10"), 499.0, 2));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_different_size_is_a_new_line() {
        let cart = Cart::new()
            .add(item("p1", Some("8x10"), 499.0, 1))
            .add(item("p1", Some("12x18"), 799.0, 1));
        assert_eq!(cart.items.len(), 2);
    }

    #[test]
    fn test_operations_do_not_mutate_the_source() {
        let original = Cart::new().add(item("p1", None, 100.0, 1));
        let _bigger = original.add(item("p2", None, 50.0, 1));
        assert_eq!(original.items.len(), 1);
    }

    #[test]
    fn test_update_quantity_and_remove() {
        let cart = Cart::new().add(item("p1", None, 100.0, 2));
        let cart = cart.update_quantity("p1", None, None, 5);
        assert_eq!(cart.items[0].quantity, 5);
        let cart = cart.update_quantity("p1", None, None, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let cart = Cart::new()
            .add(item("p1", None, 10.99, 3))
            .add(item("p2", None, 0.01, 100));
        assert_eq!(cart.total_items(), 103);
        assert_eq!(cart.subtotal(), 33.97); // 32.97 + 1.00, exact in Decimal
    }

    #[test]
    fn test_snapshot_round_trip() {
        let cart = Cart::new().add(item("p1", Some("8x10"), 499.0, 2));
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(cart, restored);
    }
}
