//! Order API Handlers
//!
//! 金额在服务端重算，不信任请求里携带的数值。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{
    Order, OrderCancelRequest, OrderCreate, OrderStatus, OrderStatusUpdate, OrderTrackView,
    PaymentStatus,
};
use crate::db::repository::{OrderRepository, order::OrderPage};
use crate::orders::lifecycle::{check_admin_transition, check_customer_cancel};
use crate::orders::number::parse_sequence;
use crate::pricing::{order_totals, to_decimal, to_f64};
use crate::utils::validation;
use crate::utils::{AppError, AppResult};

/// Admin listing query parameters
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

fn validate_order_create(data: &OrderCreate) -> Result<(), AppError> {
    if data.items.is_empty() {
        return Err(AppError::validation("Order must have at least one item"));
    }
    for item in &data.items {
        if item.quantity <= 0 {
            return Err(AppError::validation(format!(
                "Invalid quantity for {}",
                item.sku
            )));
        }
        if item.unit_price < 0.0 {
            return Err(AppError::validation(format!(
                "Invalid unit price for {}",
                item.sku
            )));
        }
    }

    let customer = &data.customer;
    validation::validate_required_text(&customer.name, "name", validation::MAX_NAME_LEN)?;
    validation::validate_email(&customer.email)?;
    validation::validate_phone(&customer.phone)?;
    validation::validate_required_text(
        &customer.address.street,
        "street",
        validation::MAX_ADDRESS_LEN,
    )?;
    validation::validate_required_text(
        &customer.address.city,
        "city",
        validation::MAX_SHORT_TEXT_LEN,
    )?;
    validation::validate_required_text(
        &customer.address.state,
        "state",
        validation::MAX_SHORT_TEXT_LEN,
    )?;
    validation::validate_pincode(&customer.address.pincode)?;
    Ok(())
}

/// Recompute all money fields from the line items and shipping method.
/// Whatever the client sent in those fields is discarded.
fn reprice(data: &mut OrderCreate) {
    let subtotal: Decimal = data
        .items
        .iter()
        .map(|item| to_decimal(item.unit_price) * Decimal::from(item.quantity))
        .sum();
    let totals = order_totals(subtotal, data.shipping_method);

    data.subtotal = to_f64(totals.subtotal);
    data.shipping_charges = to_f64(totals.shipping_charges);
    data.tax_amount = to_f64(totals.tax_amount);
    data.discount_amount = 0.0;
    data.total_amount = to_f64(totals.total_amount);
    data.payment.amount = data.total_amount;
}

/// POST /api/orders - 下单
pub async fn create(
    State(state): State<ServerState>,
    Json(mut data): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    validate_order_create(&data)?;
    reprice(&mut data);

    let repo = OrderRepository::new(state.get_db());
    let order = repo.create(data).await?;

    tracing::info!(
        order_number = %order.order_number,
        total = order.total_amount,
        items = order.items.len(),
        "Order created"
    );
    Ok(Json(order))
}

/// GET /api/orders/:id - 订单详情 (确认页，记录 ID 即访问凭证)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;
    Ok(Json(order))
}

/// GET /api/orders/track/:order_number - 订单追踪 (联系方式脱敏)
pub async fn track(
    State(state): State<ServerState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<OrderTrackView>> {
    // numbers that cannot have been issued skip the database lookup
    if parse_sequence(&order_number).is_none() {
        return Err(AppError::not_found(format!("Order {}", order_number)));
    }

    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_order_number(&order_number)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", order_number)))?;
    Ok(Json(order.to_track_view()))
}

/// POST /api/orders/cancel/:id - 客户取消订单
///
/// 所有权校验：请求里的邮箱或手机必须和订单一致。
/// 仅 pending/confirmed 可取消；已支付的订单同时标记为已退款。
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<OrderCancelRequest>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;

    if !req.matches_customer(&order.customer) {
        tracing::warn!(order_number = %order.order_number, "Cancellation ownership check failed");
        return Err(AppError::forbidden(
            "Email or phone does not match this order",
        ));
    }

    check_customer_cancel(order.status).map_err(|_| {
        AppError::business_rule(format!(
            "Order in status '{}' can no longer be cancelled",
            order.status.as_str()
        ))
    })?;

    let was_paid = order.payment.status == PaymentStatus::Paid;
    let cancelled = repo.cancel(&id, was_paid, req.reason).await?;

    tracing::info!(
        order_number = %cancelled.order_number,
        refunded = was_paid,
        "Order cancelled by customer"
    );
    Ok(Json(cancelled))
}

/// GET /api/orders - 订单列表 (管理端)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<OrderPage>> {
    let repo = OrderRepository::new(state.get_db());
    let page = repo
        .find_page(query.status, query.page, query.limit)
        .await?;
    Ok(Json(page))
}

/// PUT /api/orders/:id/status - 订单状态流转 (管理端)
///
/// 非法流转返回 422；`force: true` 跳过流转表检查。
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;

    check_admin_transition(order.status, data.status, data.force).map_err(|e| {
        AppError::business_rule(format!("Invalid status transition: {}", e))
    })?;

    let updated = repo.update_status(&id, &data).await?;

    tracing::info!(
        order_number = %updated.order_number,
        from = order.status.as_str(),
        to = updated.status.as_str(),
        force = data.force,
        "Order status updated"
    );
    Ok(Json(updated))
}
