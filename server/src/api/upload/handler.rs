//! Image Upload Handler
//!
//! Handles image uploads from the back office.
//! Supports multiple image formats (PNG, JPEG, WebP) and converts to JPG.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use std::io::Cursor;
use std::path::PathBuf;
use std::fs;
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality (85% keeps artwork photos presentable while controlling size)
const JPEG_QUALITY: u8 = 85;

/// Folders accepted under public/
const ALLOWED_FOLDERS: &[&str] = &["products", "banners", "categories"];

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_id: String,
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    pub format: String,
    pub url: String,
}

/// Validate image file
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {} bytes ({}MB)",
            MAX_FILE_SIZE,
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext_lower,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    // Verify it's actually an image by trying to load it
    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::validation(format!(
            "Invalid image file ({}): {}",
            ext_lower, e
        )));
    }

    Ok(())
}

/// Re-encode as JPEG with the fixed quality setting
fn compress_to_jpeg(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
    }

    Ok(buffer)
}

/// Validate, compress, and store one image under public/<folder>/.
/// Returns the public URL path ("/public/<folder>/<uuid>.jpg").
pub fn save_public_image(
    state: &ServerState,
    folder: &str,
    original_name: &str,
    data: Vec<u8>,
) -> Result<String, AppError> {
    if !ALLOWED_FOLDERS.contains(&folder) {
        return Err(AppError::validation(format!(
            "Invalid upload folder '{}'. Allowed: {}",
            folder,
            ALLOWED_FOLDERS.join(", ")
        )));
    }

    if data.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }

    let ext = PathBuf::from(original_name)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_string()))
        .ok_or_else(|| {
            AppError::validation(format!("Invalid file extension for: {}", original_name))
        })?;

    validate_image(&data, &ext)?;
    let compressed = compress_to_jpeg(&data)?;

    let target_dir = state.config.public_dir().join(folder);
    fs::create_dir_all(&target_dir)
        .map_err(|e| AppError::internal(format!("Failed to create upload directory: {}", e)))?;

    let file_id = Uuid::new_v4().to_string();
    let filename = format!("{}.jpg", file_id);
    let file_path = target_dir.join(&filename);

    fs::write(&file_path, &compressed)
        .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

    tracing::info!(
        original_name = %original_name,
        folder = %folder,
        size = compressed.len(),
        "Image uploaded"
    );

    Ok(format!("/public/{}/{}", folder, filename))
}

/// POST /api/upload - 上传图片
///
/// 字段:
/// - `file`: 图片文件 (必填)
/// - `folder`: 目标目录, products | banners | categories (默认 products)
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;
    let mut folder = "products".to_string();

    while let Some(f) = multipart.next_field().await? {
        match f.name() {
            Some("file") | Some("") | None => {
                original_filename = f.file_name().map(|s| s.to_string());
                field_data = Some(f.bytes().await?.to_vec());
            }
            Some("folder") => {
                folder = f.text().await?;
            }
            _ => {}
        }
    }

    let data = field_data
        .ok_or_else(|| AppError::validation("No 'file' field found. Field name must be 'file'"))?;
    let original_name = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in file field"))?;

    let size = data.len();
    let url = save_public_image(&state, &folder, &original_name, data)?;
    let filename = url.rsplit('/').next().unwrap_or_default().to_string();
    let file_id = filename
        .strip_suffix(".jpg")
        .unwrap_or(&filename)
        .to_string();

    Ok(Json(UploadResponse {
        file_id,
        filename,
        original_name,
        size,
        format: "jpg".to_string(),
        url,
    }))
}
