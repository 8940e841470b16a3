//! Product Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Product ID type
pub type ProductId = RecordId;

/// A purchasable size variant (frame dimensions with its own pricing)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeOption {
    pub label: String,
    pub price: f64,
    /// Promotional price, effective only when strictly lower than `price`
    pub offer_price: Option<f64>,
    /// Physical dimensions, e.g. "12x18 in"
    pub dimensions: Option<String>,
}

/// A style variant (e.g. matte finish, gold leaf) with an optional surcharge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleOption {
    pub label: String,
    #[serde(default)]
    pub additional_price: f64,
}

/// Product model matching the `product` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ProductId>,
    pub title: String,
    pub base_price: f64,
    /// Promotional price, effective only when strictly lower than `base_price`
    pub offer_price: Option<f64>,
    pub category: String,
    pub subcategory: Option<String>,
    pub material: Option<String>,
    pub style: Option<String>,
    pub occasion: Option<String>,
    #[serde(default)]
    pub stock: i32,
    /// Unique inventory code (unique index enforced in the schema)
    pub sku: String,
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
    #[serde(default)]
    pub styles: Vec<StyleOption>,
    /// Gallery image paths, in display order
    #[serde(default)]
    pub images: Vec<String>,
    /// The single image shown in list views
    #[serde(default)]
    pub featured_image: String,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_available: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_best_seller: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_new_arrival: bool,
    #[serde(default)]
    pub total_sold: i64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i64,
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub title: String,
    pub base_price: f64,
    pub offer_price: Option<f64>,
    pub category: String,
    pub subcategory: Option<String>,
    pub material: Option<String>,
    pub style: Option<String>,
    pub occasion: Option<String>,
    pub stock: Option<i32>,
    pub sku: String,
    pub sizes: Option<Vec<SizeOption>>,
    pub styles: Option<Vec<StyleOption>>,
    pub images: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub is_featured: Option<bool>,
    pub is_best_seller: Option<bool>,
    pub is_new_arrival: Option<bool>,
}

/// Update product payload (all fields optional, missing = unchanged)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub base_price: Option<f64>,
    pub offer_price: Option<f64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub material: Option<String>,
    pub style: Option<String>,
    pub occasion: Option<String>,
    pub stock: Option<i32>,
    pub sku: Option<String>,
    pub sizes: Option<Vec<SizeOption>>,
    pub styles: Option<Vec<StyleOption>>,
    pub images: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub is_active: Option<bool>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_best_seller: Option<bool>,
    pub is_new_arrival: Option<bool>,
}

/// Query parameters for the catalog listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// price | rating | created_at | total_sold (default created_at)
    pub sort_by: Option<String>,
    /// asc | desc (default desc)
    pub sort_order: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// One facet bucket in the listing metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFacet {
    pub category: String,
    pub count: i64,
}

/// Paginated catalog response with facet metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub facets: Vec<CategoryFacet>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}
