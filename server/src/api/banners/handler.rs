//! Banner API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{
    Banner, BannerCreate, BannerRef, BannerType, BannerUpdate, merge_with_defaults,
};
use crate::db::repository::BannerRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct BannerListQuery {
    /// hero | promotional
    #[serde(rename = "type")]
    pub banner_type: Option<BannerType>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub first: String,
    pub second: String,
}

fn parse_ref(id: &str) -> Result<BannerRef, AppError> {
    BannerRef::parse(id).ok_or_else(|| AppError::validation(format!("Invalid banner id: {id}")))
}

/// GET /api/banners - 店面横幅
///
/// 读路径按条目合并：覆盖记录替换或压制对应的默认横幅，
/// 真实横幅追加在后，整体按 display_order 排序。
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<BannerListQuery>,
) -> AppResult<Json<Vec<Banner>>> {
    let repo = BannerRepository::new(state.get_db());
    let stored = repo.find_all_stored().await?;
    let merged = merge_with_defaults(stored);
    Ok(Json(BannerRepository::filter_by_type(
        merged,
        query.banner_type,
    )))
}

/// GET /api/banners/all - 所有存储记录 (管理端, 不合并)
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<Banner>>> {
    let repo = BannerRepository::new(state.get_db());
    let stored = repo.find_all_stored().await?;
    Ok(Json(stored))
}

/// POST /api/banners - 新建横幅
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<BannerCreate>,
) -> AppResult<Json<Banner>> {
    let repo = BannerRepository::new(state.get_db());
    let banner = repo.create(data).await?;

    tracing::info!(title = %banner.title, "Banner created");
    Ok(Json(banner))
}

/// PUT /api/banners/:id - 编辑横幅
///
/// id 是默认键 ("1"|"2"|"3") 或存储记录 ID。编辑默认横幅时
/// 先物化覆盖记录 (copy-on-write)，之后补丁落在覆盖记录上。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<BannerUpdate>,
) -> AppResult<Json<Banner>> {
    let banner_ref = parse_ref(&id)?;
    let repo = BannerRepository::new(state.get_db());
    let banner = repo.update(&banner_ref, data).await?;
    Ok(Json(banner))
}

/// DELETE /api/banners/:id - 删除/停用横幅
///
/// 真实横幅物理删除；默认横幅通过停用的覆盖记录来压制。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<()>> {
    let banner_ref = parse_ref(&id)?;
    let repo = BannerRepository::new(state.get_db());
    repo.delete(&banner_ref).await?;

    tracing::info!(banner = %id, "Banner deleted");
    Ok(Json(()))
}

/// PUT /api/banners/reorder - 交换显示顺序
///
/// 两条记录的 display_order 在一个事务里互换。
pub async fn reorder(
    State(state): State<ServerState>,
    Json(req): Json<ReorderRequest>,
) -> AppResult<Json<()>> {
    let repo = BannerRepository::new(state.get_db());
    repo.swap_display_order(&req.first, &req.second).await?;
    Ok(Json(()))
}
