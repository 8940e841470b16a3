//! Category Model
//!
//! Denormalized grouping metadata. Product counts are never stored; the
//! listing derives them live from active/available products.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Category ID type
pub type CategoryId = RecordId;

/// Fixed category names carried by the storefront
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryName {
    Frames,
    WallArt,
    Canvas,
    Posters,
    Collages,
    GiftSets,
}

impl CategoryName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryName::Frames => "frames",
            CategoryName::WallArt => "wall-art",
            CategoryName::Canvas => "canvas",
            CategoryName::Posters => "posters",
            CategoryName::Collages => "collages",
            CategoryName::GiftSets => "gift-sets",
        }
    }
}

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<CategoryId>,
    pub name: CategoryName,
    pub slug: String,
    pub description: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Category with its live product count (listing response)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: i64,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: CategoryName,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub display_order: Option<i32>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<CategoryName>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}
