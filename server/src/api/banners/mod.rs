//! Banner API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/banners | GET | 店面横幅 (默认+覆盖合并) | 无 |
//! | /api/banners/all | GET | 所有存储记录 (不合并) | 管理员 |
//! | /api/banners | POST | 新建横幅 | 管理员 |
//! | /api/banners/{id} | PUT | 编辑横幅 (默认横幅首次编辑时物化) | 管理员 |
//! | /api/banners/{id} | DELETE | 删除/停用横幅 | 管理员 |
//! | /api/banners/reorder | PUT | 交换两条横幅的显示顺序 | 管理员 |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/banners", banner_routes())
}

fn banner_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/all", get(handler::list_all))
        .route("/reorder", put(handler::reorder))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
