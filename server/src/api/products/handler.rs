//! Product API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};

use crate::api::upload::handler::save_public_image;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductPage, ProductQuery, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/products - 商品列表 (筛选/分页/facets)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ProductPage>> {
    let repo = ProductRepository::new(state.get_db());
    let page = repo.find_page(&query).await?;
    Ok(Json(page))
}

/// GET /api/products/:id - 商品详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;
    Ok(Json(product))
}

/// POST /api/products - 创建商品 (JSON)
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(data).await?;

    tracing::info!(
        sku = %product.sku,
        title = %product.title,
        "Product created"
    );
    Ok(Json(product))
}

/// POST /api/create-product - 创建商品 (multipart)
///
/// 字段:
/// - `data`: JSON 编码的 [`ProductCreate`]
/// - `images`: 零或多个图片文件，按出现顺序存储，第一张作为封面
pub async fn create_multipart(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<Product>> {
    let mut payload: Option<ProductCreate> = None;
    let mut image_paths: Vec<String> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("data") => {
                let text = field.text().await?;
                let parsed: ProductCreate = serde_json::from_str(&text)
                    .map_err(|e| AppError::validation(format!("Invalid product data: {}", e)))?;
                payload = Some(parsed);
            }
            Some("images") => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| AppError::validation("Image field without filename"))?;
                let data = field.bytes().await?.to_vec();
                let url = save_public_image(&state, "products", &filename, data)?;
                image_paths.push(url);
            }
            _ => {}
        }
    }

    let mut data =
        payload.ok_or_else(|| AppError::validation("Missing 'data' field in multipart body"))?;

    if !image_paths.is_empty() {
        let mut images = data.images.take().unwrap_or_default();
        images.extend(image_paths);
        if data.featured_image.is_none() {
            data.featured_image = images.first().cloned();
        }
        data.images = Some(images);
    }

    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(data).await?;

    tracing::info!(
        sku = %product.sku,
        images = product.images.len(),
        "Product created with images"
    );
    Ok(Json(product))
}

/// PUT /api/products/update/:id - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo.update(&id, data).await?;
    Ok(Json(product))
}

/// DELETE /api/products/delete/:id - 软删除
///
/// 商品不会物理删除，只清掉 active/available 标志。
/// 历史订单里的行项快照不受影响。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo.soft_delete(&id).await?;

    tracing::info!(sku = %product.sku, "Product soft-deleted");
    Ok(Json(product))
}
