//! Order Repository
//!
//! 订单号分配走每日计数器，用 UPSERT 原子自增，唯一索引兜底

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{
    Order, OrderCreate, OrderStatus, OrderStatusUpdate, OrderTracking, PaymentStatus,
};
use crate::orders::number::{day_key, format_order_number};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "order";
const COUNTER_TABLE: &str = "order_counter";

const DEFAULT_PAGE_LIMIT: u32 = 20;
const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

#[derive(serde::Deserialize)]
struct CounterRow {
    value: i64,
}

#[derive(serde::Deserialize)]
struct CountRow {
    count: i64,
}

/// Paginated admin order listing
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Allocate the next order number for today. The UPSERT increments the
    /// per-day counter atomically, so two concurrent orders never share a
    /// sequence number.
    pub async fn next_order_number(&self) -> RepoResult<String> {
        let day = day_key(chrono::Utc::now());
        let query = format!(
            "UPSERT type::thing('{COUNTER_TABLE}', $day) SET value += 1 RETURN AFTER"
        );
        let mut result = self
            .base
            .db()
            .query(&query)
            .bind(("day", day.clone()))
            .await?;
        let rows: Vec<CounterRow> = result.take(0)?;
        let seq = rows
            .first()
            .map(|r| r.value)
            .ok_or_else(|| RepoError::Database("Counter allocation returned no row".to_string()))?;
        Ok(format_order_number(&day, seq as u32))
    }

    /// Create an order. When the payload carries an idempotency key that was
    /// seen before, the stored order is returned and nothing new is written.
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        if data.items.is_empty() {
            return Err(RepoError::Validation("Order must have at least one item".into()));
        }

        if let Some(ref key) = data.idempotency_key
            && let Some(existing) = self.find_by_idempotency_key(key).await?
        {
            return Ok(existing);
        }

        let order_number = self.next_order_number().await?;
        let order = Order {
            id: None,
            order_number,
            customer: data.customer,
            items: data.items,
            subtotal: data.subtotal,
            shipping_charges: data.shipping_charges,
            tax_amount: data.tax_amount,
            discount_amount: data.discount_amount,
            total_amount: data.total_amount,
            payment: data.payment,
            status: OrderStatus::Pending,
            tracking: None,
            shipping_method: data.shipping_method,
            expected_delivery: None,
            admin_note: None,
            customer_note: data.customer_note,
            idempotency_key: data.idempotency_key,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };

        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(ORDER_TABLE, id);
        let order: Option<Order> = self.base.db().select((ORDER_TABLE, pure_id)).await?;
        Ok(order)
    }

    pub async fn find_by_order_number(&self, order_number: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE order_number = $order_number LIMIT 1")
            .bind(("order_number", order_number.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    async fn find_by_idempotency_key(&self, key: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE idempotency_key = $key LIMIT 1")
            .bind(("key", key.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Admin listing, newest first, optional status filter
    pub async fn find_page(
        &self,
        status: Option<OrderStatus>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> RepoResult<OrderPage> {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
        let start = u64::from(page - 1) * u64::from(limit);

        let where_clause = if status.is_some() {
            "WHERE status = $status"
        } else {
            ""
        };
        let list_query = format!(
            "SELECT * FROM order {where_clause} ORDER BY created_at DESC LIMIT $limit START $start"
        );
        let count_query = format!("SELECT count() FROM order {where_clause} GROUP ALL");

        let mut db_query = self
            .base
            .db()
            .query(&list_query)
            .query(&count_query)
            .bind(("limit", i64::from(limit)))
            .bind(("start", start as i64));
        if let Some(status) = status {
            db_query = db_query.bind(("status", status.as_str()));
        }

        let mut result = db_query.await?;
        let orders: Vec<Order> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);
        let total_pages = ((total as u32) + limit - 1) / limit;

        Ok(OrderPage {
            orders,
            total,
            page,
            limit,
            total_pages,
        })
    }

    /// Apply an admin status change that has already passed the lifecycle
    /// check. Tracking and delivery fields piggyback on the same update.
    pub async fn update_status(&self, id: &str, data: &OrderStatusUpdate) -> RepoResult<Order> {
        let pure_id = strip_table_prefix(ORDER_TABLE, id).to_string();

        let mut set_parts = vec!["status = $status"];
        if data.tracking.is_some() {
            set_parts.push("tracking = $tracking");
        }
        if data.expected_delivery.is_some() {
            set_parts.push("expected_delivery = $expected_delivery");
        }
        if data.admin_note.is_some() {
            set_parts.push("admin_note = $admin_note");
        }

        let query_str = format!(
            "UPDATE type::thing('order', $pure_id) SET {} RETURN AFTER",
            set_parts.join(", ")
        );

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("pure_id", pure_id))
            .bind(("status", data.status.as_str()));
        if let Some(tracking) = data.tracking.clone() {
            query = query.bind(("tracking", tracking));
        }
        if let Some(expected_delivery) = data.expected_delivery.clone() {
            query = query.bind(("expected_delivery", expected_delivery));
        }
        if let Some(admin_note) = data.admin_note.clone() {
            query = query.bind(("admin_note", admin_note));
        }

        let mut result = query.await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Cancel an order. A paid order flips to refunded in the same write so
    /// the two fields never disagree.
    pub async fn cancel(&self, id: &str, was_paid: bool, reason: Option<String>) -> RepoResult<Order> {
        let pure_id = strip_table_prefix(ORDER_TABLE, id).to_string();

        let mut set_parts = vec!["status = $status"];
        if was_paid {
            set_parts.push("payment.status = $payment_status");
        }
        if reason.is_some() {
            set_parts.push("admin_note = $reason");
        }

        let query_str = format!(
            "UPDATE type::thing('order', $pure_id) SET {} RETURN AFTER",
            set_parts.join(", ")
        );

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("pure_id", pure_id))
            .bind(("status", OrderStatus::Cancelled.as_str()));
        if was_paid {
            query = query.bind(("payment_status", PaymentStatus::Refunded));
        }
        if let Some(reason) = reason {
            query = query.bind(("reason", format!("Cancelled by customer: {reason}")));
        }

        let mut result = query.await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Attach tracking data without touching the status
    pub async fn set_tracking(&self, id: &str, tracking: OrderTracking) -> RepoResult<Order> {
        let pure_id = strip_table_prefix(ORDER_TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query("UPDATE type::thing('order', $pure_id) SET tracking = $tracking RETURN AFTER")
            .bind(("pure_id", pure_id))
            .bind(("tracking", tracking))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
