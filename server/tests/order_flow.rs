//! 订单全流程集成测试：编号分配、幂等键、取消退款
//! Run: cargo test -p framery-server --test order_flow

use framery_server::db::DbService;
use framery_server::db::models::{
    Order, OrderAddress, OrderCancelRequest, OrderCreate, OrderCustomer, OrderItem, OrderPayment,
    OrderStatus, OrderStatusUpdate, OrderTracking, PaymentStatus,
};
use framery_server::db::repository::OrderRepository;
use framery_server::orders::lifecycle::check_customer_cancel;
use framery_server::orders::number::{day_key, parse_sequence};
use framery_server::pricing::ShippingMethod;

fn sample_create(idempotency_key: Option<&str>) -> OrderCreate {
    OrderCreate {
        customer: OrderCustomer {
            name: "Asha Verma".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: OrderAddress {
                street: "14 MG Road".to_string(),
                city: "Pune".to_string(),
                state: "MH".to_string(),
                pincode: "411001".to_string(),
            },
        },
        items: vec![OrderItem {
            product_id: "product:abc".to_string(),
            title: "Walnut Frame 12x18".to_string(),
            unit_price: 1499.0,
            quantity: 1,
            size: Some("12x18 in".to_string()),
            style: None,
            sku: "FRM-WAL-1218".to_string(),
            image: "/public/products/frame.jpg".to_string(),
        }],
        subtotal: 1499.0,
        shipping_charges: 0.0,
        tax_amount: 269.82,
        discount_amount: 0.0,
        total_amount: 1768.82,
        payment: OrderPayment {
            method: "cod".to_string(),
            status: PaymentStatus::Pending,
            transaction_id: None,
            amount: 1768.82,
            currency: "INR".to_string(),
        },
        shipping_method: ShippingMethod::Standard,
        customer_note: None,
        idempotency_key: idempotency_key.map(|s| s.to_string()),
    }
}

fn order_id(order: &Order) -> String {
    order.id.as_ref().unwrap().key().to_string()
}

#[tokio::test]
async fn order_numbers_are_sequential_within_a_day() {
    let db = DbService::new_memory().await.unwrap();
    let repo = OrderRepository::new(db.db.clone());

    let today = day_key(chrono::Utc::now());
    let mut sequences = Vec::new();
    for _ in 0..3 {
        let order = repo.create(sample_create(None)).await.unwrap();
        assert!(
            order.order_number.contains(&today),
            "order number {} should carry today's day key",
            order.order_number
        );
        sequences.push(parse_sequence(&order.order_number).unwrap());
    }
    assert_eq!(sequences, vec![1, 2, 3]);
}

#[tokio::test]
async fn idempotency_key_returns_stored_order() {
    let db = DbService::new_memory().await.unwrap();
    let repo = OrderRepository::new(db.db.clone());

    let first = repo.create(sample_create(Some("retry-1"))).await.unwrap();
    let second = repo.create(sample_create(Some("retry-1"))).await.unwrap();
    assert_eq!(first.order_number, second.order_number);

    // a retried submit must not create a second document
    let page = repo.find_page(None, None, None).await.unwrap();
    assert_eq!(page.total, 1);

    let third = repo.create(sample_create(Some("retry-2"))).await.unwrap();
    assert_ne!(first.order_number, third.order_number);
}

#[tokio::test]
async fn empty_order_is_rejected() {
    let db = DbService::new_memory().await.unwrap();
    let repo = OrderRepository::new(db.db.clone());

    let mut payload = sample_create(None);
    payload.items.clear();
    assert!(repo.create(payload).await.is_err());
}

#[tokio::test]
async fn cancel_paid_order_flips_payment_to_refunded() {
    let db = DbService::new_memory().await.unwrap();
    let repo = OrderRepository::new(db.db.clone());

    let mut payload = sample_create(None);
    payload.payment.status = PaymentStatus::Paid;
    let order = repo.create(payload).await.unwrap();

    let cancelled = repo
        .cancel(&order_id(&order), true, Some("changed my mind".to_string()))
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.payment.status, PaymentStatus::Refunded);
    assert!(
        cancelled
            .admin_note
            .as_deref()
            .unwrap()
            .contains("changed my mind")
    );
}

#[tokio::test]
async fn cancel_unpaid_order_keeps_payment_status() {
    let db = DbService::new_memory().await.unwrap();
    let repo = OrderRepository::new(db.db.clone());

    let order = repo.create(sample_create(None)).await.unwrap();
    let cancelled = repo.cancel(&order_id(&order), false, None).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.payment.status, PaymentStatus::Pending);
}

#[tokio::test]
async fn absurd_page_number_yields_empty_page_instead_of_panicking() {
    let db = DbService::new_memory().await.unwrap();
    let repo = OrderRepository::new(db.db.clone());

    repo.create(sample_create(None)).await.unwrap();

    let page = repo
        .find_page(None, Some(u32::MAX), Some(100))
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert!(page.orders.is_empty());
}

#[tokio::test]
async fn cancellation_requires_matching_contact() {
    let db = DbService::new_memory().await.unwrap();
    let repo = OrderRepository::new(db.db.clone());

    let order = repo.create(sample_create(None)).await.unwrap();

    let stranger = OrderCancelRequest {
        email: Some("someone-else@example.com".to_string()),
        phone: Some("1112223334".to_string()),
        reason: None,
    };
    assert!(!stranger.matches_customer(&order.customer));

    // email is case-insensitive, phone is exact
    let by_email = OrderCancelRequest {
        email: Some("ASHA@Example.COM".to_string()),
        phone: None,
        reason: None,
    };
    assert!(by_email.matches_customer(&order.customer));

    let by_phone = OrderCancelRequest {
        email: None,
        phone: Some("9876543210".to_string()),
        reason: None,
    };
    assert!(by_phone.matches_customer(&order.customer));

    let cancelled = repo
        .cancel(&order_id(&order), false, Some("ordered twice".to_string()))
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn shipped_order_refuses_customer_cancellation() {
    let db = DbService::new_memory().await.unwrap();
    let repo = OrderRepository::new(db.db.clone());

    let order = repo.create(sample_create(None)).await.unwrap();
    let id = order_id(&order);

    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
    ] {
        repo.update_status(
            &id,
            &OrderStatusUpdate {
                status,
                force: false,
                tracking: None,
                expected_delivery: None,
                admin_note: None,
            },
        )
        .await
        .unwrap();
    }

    let shipped = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert!(check_customer_cancel(shipped.status).is_err());
}

#[tokio::test]
async fn status_update_carries_tracking_fields() {
    let db = DbService::new_memory().await.unwrap();
    let repo = OrderRepository::new(db.db.clone());

    let order = repo.create(sample_create(None)).await.unwrap();
    let id = order_id(&order);

    let confirmed = repo
        .update_status(
            &id,
            &OrderStatusUpdate {
                status: OrderStatus::Confirmed,
                force: false,
                tracking: None,
                expected_delivery: None,
                admin_note: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);
    assert!(confirmed.tracking.is_none());

    let shipped = repo
        .update_status(
            &id,
            &OrderStatusUpdate {
                status: OrderStatus::Shipped,
                force: false,
                tracking: Some(OrderTracking {
                    carrier: "BlueDart".to_string(),
                    tracking_number: "BD123456".to_string(),
                    url: None,
                }),
                expected_delivery: Some("2026-09-05".to_string()),
                admin_note: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert_eq!(shipped.tracking.unwrap().tracking_number, "BD123456");
    assert_eq!(shipped.expected_delivery.as_deref(), Some("2026-09-05"));
}

#[tokio::test]
async fn find_by_order_number_and_status_filter() {
    let db = DbService::new_memory().await.unwrap();
    let repo = OrderRepository::new(db.db.clone());

    let a = repo.create(sample_create(None)).await.unwrap();
    let b = repo.create(sample_create(None)).await.unwrap();
    repo.cancel(&order_id(&b), false, None).await.unwrap();

    let found = repo
        .find_by_order_number(&a.order_number)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.order_number, a.order_number);

    let pending = repo
        .find_page(Some(OrderStatus::Pending), None, None)
        .await
        .unwrap();
    assert_eq!(pending.total, 1);
    assert_eq!(pending.orders[0].order_number, a.order_number);

    let cancelled = repo
        .find_page(Some(OrderStatus::Cancelled), None, None)
        .await
        .unwrap();
    assert_eq!(cancelled.total, 1);
}
