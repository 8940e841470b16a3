//! Order API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/orders | POST | 下单 | 无 |
//! | /api/orders/{id} | GET | 订单详情 (确认页) | 无 |
//! | /api/orders/track/{order_number} | GET | 订单追踪 (脱敏) | 无 |
//! | /api/orders/cancel/{id} | POST | 客户取消订单 | 无 (邮箱/手机校验) |
//! | /api/orders | GET | 订单列表 | 管理员 |
//! | /api/orders/{id}/status | PUT | 订单状态流转 | 管理员 |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/track/{order_number}", get(handler::track))
        .route("/cancel/{id}", post(handler::cancel))
        .route("/{id}/status", put(handler::update_status))
}
