//! Category API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/categories | GET | 分类列表 (带实时商品数) | 无 |
//! | /api/categories | POST | 新建分类 | 管理员 |
//! | /api/categories/{id} | PUT | 更新分类 | 管理员 |
//! | /api/categories/{id} | DELETE | 删除分类 | 管理员 |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", category_routes())
}

fn category_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
