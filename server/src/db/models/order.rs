//! Order Model
//!
//! 订单是下单时刻的快照：行项复制商品数据，金额只在创建时计算一次

use super::serde_helpers;
use crate::pricing::ShippingMethod;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

/// Order status enum
///
/// `pending → confirmed → processing → shipped → delivered`, with
/// `cancelled` and `returned` as side exits. Transition rules live in
/// [`crate::orders::lifecycle`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
        }
    }
}

/// Payment status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// Embedded customer record (point-in-time copy, not a live reference)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: OrderAddress,
}

/// Shipping address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// Immutable line item snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product id at purchase time ("product:xyz"); kept as a plain string
    /// because the product may later be soft-deleted or mutated
    pub product_id: String,
    pub title: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub size: Option<String>,
    pub style: Option<String>,
    pub sku: String,
    pub image: String,
}

/// Payment sub-record (gateway integration is a stub; COD is the common path)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPayment {
    pub method: String,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub amount: f64,
    pub currency: String,
}

/// Shipment tracking sub-record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTracking {
    pub carrier: String,
    pub tracking_number: String,
    pub url: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<OrderId>,
    /// Human-readable unique number: ORD-YYYYMMDD-NNNN
    pub order_number: String,
    pub customer: OrderCustomer,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub shipping_charges: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    /// subtotal + shipping_charges + tax_amount - discount_amount,
    /// computed once at creation and never re-derived
    pub total_amount: f64,
    pub payment: OrderPayment,
    pub status: OrderStatus,
    pub tracking: Option<OrderTracking>,
    pub shipping_method: ShippingMethod,
    pub expected_delivery: Option<String>,
    pub admin_note: Option<String>,
    pub customer_note: Option<String>,
    /// Client-supplied key; a retried submit with the same key returns the
    /// same order instead of creating a duplicate
    pub idempotency_key: Option<String>,
    pub created_at: Option<String>,
}

/// Create order payload (what the checkout wizard submits)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer: OrderCustomer,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub shipping_charges: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub payment: OrderPayment,
    pub shipping_method: ShippingMethod,
    pub customer_note: Option<String>,
    pub idempotency_key: Option<String>,
}

/// Customer-initiated cancellation request: the matching email or phone is
/// the only proof of ownership this operation has
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCancelRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub reason: Option<String>,
}

impl OrderCancelRequest {
    /// Ownership check: the email (case-insensitive) or phone must match the
    /// customer recorded on the order
    pub fn matches_customer(&self, customer: &OrderCustomer) -> bool {
        let email_match = self
            .email
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case(&customer.email));
        let phone_match = self
            .phone
            .as_deref()
            .is_some_and(|p| p == customer.phone);
        email_match || phone_match
    }
}

/// Admin status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    /// Bypass the transition table (legacy unconstrained update)
    #[serde(default)]
    pub force: bool,
    pub tracking: Option<OrderTracking>,
    pub expected_delivery: Option<String>,
    pub admin_note: Option<String>,
}

/// Public tracking view: same order with contact details redacted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTrackView {
    pub order_number: String,
    pub customer_name: String,
    /// e.g. "a***@example.com"
    pub email: String,
    /// e.g. "98******10"
    pub phone: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub tracking: Option<OrderTracking>,
    pub shipping_method: ShippingMethod,
    pub expected_delivery: Option<String>,
    pub created_at: Option<String>,
}

impl Order {
    /// Build the redacted public tracking view
    pub fn to_track_view(&self) -> OrderTrackView {
        OrderTrackView {
            order_number: self.order_number.clone(),
            customer_name: self.customer.name.clone(),
            email: redact_email(&self.customer.email),
            phone: redact_phone(&self.customer.phone),
            items: self.items.clone(),
            total_amount: self.total_amount,
            status: self.status,
            tracking: self.tracking.clone(),
            shipping_method: self.shipping_method,
            expected_delivery: self.expected_delivery.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

/// Keep the first character of the local part, mask the rest
pub fn redact_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Keep the first and last two digits, mask the middle
pub fn redact_phone(phone: &str) -> String {
    if phone.len() < 4 {
        return "*".repeat(phone.len());
    }
    let head = &phone[..2];
    let tail = &phone[phone.len() - 2..];
    format!("{}{}{}", head, "*".repeat(phone.len() - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_email() {
        assert_eq!(redact_email("ana@example.com"), "a***@example.com");
        assert_eq!(redact_email("not-an-email"), "***");
    }

    #[test]
    fn test_redact_phone() {
        assert_eq!(redact_phone("9876543210"), "98******10");
        assert_eq!(redact_phone("12"), "**");
    }
}
