//! Product API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/products | GET | 商品列表 (筛选/分页/facets) | 无 |
//! | /api/products/{id} | GET | 商品详情 | 无 |
//! | /api/products | POST | 创建商品 (JSON) | 管理员 |
//! | /api/create-product | POST | 创建商品 (multipart, 带图片) | 管理员 |
//! | /api/products/update/{id} | PUT | 更新商品 | 管理员 |
//! | /api/products/delete/{id} | DELETE | 下架商品 (软删除) | 管理员 |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/products", product_routes())
        .route("/api/create-product", post(handler::create_multipart))
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/update/{id}", put(handler::update))
        .route("/delete/{id}", delete(handler::delete))
}
