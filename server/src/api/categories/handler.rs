//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate, CategoryWithCount};
use crate::db::repository::CategoryRepository;
use crate::utils::AppResult;

/// GET /api/categories - 分类列表
///
/// 商品数是实时聚合出来的，只统计 active 且 available 的商品。
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<CategoryWithCount>>> {
    let repo = CategoryRepository::new(state.get_db());
    let categories = repo.find_all_with_counts().await?;
    Ok(Json(categories))
}

/// POST /api/categories - 新建分类
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.get_db());
    let category = repo.create(data).await?;

    tracing::info!(slug = %category.slug, "Category created");
    Ok(Json(category))
}

/// PUT /api/categories/:id - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.get_db());
    let category = repo.update(&id, data).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/:id - 删除分类
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<()>> {
    let repo = CategoryRepository::new(state.get_db());
    repo.delete(&id).await?;

    tracing::info!(category = %id, "Category deleted");
    Ok(Json(()))
}
