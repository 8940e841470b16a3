//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{
    CategoryFacet, Product, ProductCreate, ProductPage, ProductQuery, ProductUpdate,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

/// Default page size for catalog listings
const DEFAULT_PAGE_LIMIT: u32 = 12;
const MAX_PAGE_LIMIT: u32 = 100;

/// Sort fields the listing accepts (everything else falls back to created_at)
const SORT_FIELDS: &[&str] = &["base_price", "price", "rating", "total_sold", "created_at"];

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

#[derive(serde::Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(serde::Deserialize)]
struct PriceRange {
    min_price: Option<f64>,
    max_price: Option<f64>,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Catalog listing: active/available products with filters, search,
    /// pagination, and facet metadata
    pub async fn find_page(&self, query: &ProductQuery) -> RepoResult<ProductPage> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        let start = u64::from(page - 1) * u64::from(limit);

        // WHERE clauses; values are always bound, never formatted in
        let mut conditions = vec!["is_active = true", "is_available = true"];
        if query.category.is_some() {
            conditions.push("category = $category");
        }
        if query.search.is_some() {
            conditions.push(
                "string::contains(string::lowercase(title), string::lowercase($search))",
            );
        }
        if query.min_price.is_some() {
            conditions.push("base_price >= $min_price");
        }
        if query.max_price.is_some() {
            conditions.push("base_price <= $max_price");
        }
        let where_clause = conditions.join(" AND ");

        // ORDER BY comes from a whitelist, not from the request verbatim
        let sort_by = match query.sort_by.as_deref() {
            Some(field) if SORT_FIELDS.contains(&field) => {
                if field == "price" { "base_price" } else { field }
            }
            _ => "created_at",
        };
        let sort_order = match query.sort_order.as_deref() {
            Some("asc") => "ASC",
            _ => "DESC",
        };

        let list_query = format!(
            "SELECT * FROM product WHERE {where_clause} ORDER BY {sort_by} {sort_order} LIMIT $limit START $start"
        );
        let count_query = format!("SELECT count() FROM product WHERE {where_clause} GROUP ALL");
        let range_query = format!(
            "SELECT math::min(base_price) AS min_price, math::max(base_price) AS max_price FROM product WHERE {where_clause} GROUP ALL"
        );
        let facet_query = "SELECT category, count() AS count FROM product \
             WHERE is_active = true AND is_available = true GROUP BY category";

        let mut db_query = self
            .base
            .db()
            .query(&list_query)
            .query(&count_query)
            .query(&range_query)
            .query(facet_query)
            .bind(("limit", i64::from(limit)))
            .bind(("start", start as i64));

        if let Some(category) = query.category.clone() {
            db_query = db_query.bind(("category", category));
        }
        if let Some(search) = query.search.clone() {
            db_query = db_query.bind(("search", search));
        }
        if let Some(min_price) = query.min_price {
            db_query = db_query.bind(("min_price", min_price));
        }
        if let Some(max_price) = query.max_price {
            db_query = db_query.bind(("max_price", max_price));
        }

        let mut result = db_query.await?;
        let products: Vec<Product> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let ranges: Vec<PriceRange> = result.take(2)?;
        let facets: Vec<CategoryFacet> = result.take(3)?;

        let total = counts.first().map(|c| c.count).unwrap_or(0);
        let total_pages = ((total as u32) + limit - 1) / limit;
        let (min_price, max_price) = ranges
            .into_iter()
            .next()
            .map(|r| (r.min_price, r.max_price))
            .unwrap_or((None, None));

        Ok(ProductPage {
            products,
            total,
            page,
            limit,
            total_pages,
            facets,
            min_price,
            max_price,
        })
    }

    /// Find product by id, regardless of active flags (soft-deleted products
    /// stay retrievable by id)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Find product by SKU
    pub async fn find_by_sku(&self, sku: &str) -> RepoResult<Option<Product>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE sku = $sku LIMIT 1")
            .bind(("sku", sku.to_string()))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Create a new product. SKU must be unique; the unique index is the
    /// backstop behind the lookup.
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.title.trim().is_empty() {
            return Err(RepoError::Validation("title cannot be empty".into()));
        }
        if data.base_price < 0.0 {
            return Err(RepoError::Validation("base_price must be non-negative".into()));
        }
        if self.find_by_sku(&data.sku).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "A product with SKU {} already exists",
                data.sku
            )));
        }

        let product = Product {
            id: None,
            title: data.title,
            base_price: data.base_price,
            offer_price: data.offer_price,
            category: data.category,
            subcategory: data.subcategory,
            material: data.material,
            style: data.style,
            occasion: data.occasion,
            stock: data.stock.unwrap_or(0),
            sku: data.sku,
            sizes: data.sizes.unwrap_or_default(),
            styles: data.styles.unwrap_or_default(),
            featured_image: data
                .featured_image
                .or_else(|| data.images.as_ref().and_then(|v| v.first().cloned()))
                .unwrap_or_default(),
            images: data.images.unwrap_or_default(),
            is_active: true,
            is_available: true,
            is_featured: data.is_featured.unwrap_or(false),
            is_best_seller: data.is_best_seller.unwrap_or(false),
            is_new_arrival: data.is_new_arrival.unwrap_or(false),
            total_sold: 0,
            rating: 0.0,
            review_count: 0,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };

        let created: Option<Product> = self.base.db().create(PRODUCT_TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product (only the supplied fields change)
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id).to_string();

        // A SKU change must not collide with another product
        if let Some(ref sku) = data.sku
            && let Some(existing) = self.find_by_sku(sku).await?
            && existing.id.as_ref().map(|r| r.key().to_string()) != Some(pure_id.clone())
        {
            return Err(RepoError::Duplicate(format!(
                "A product with SKU {sku} already exists"
            )));
        }

        // Build dynamic SET clauses with proper type bindings
        let mut set_parts: Vec<&str> = Vec::new();
        if data.title.is_some() { set_parts.push("title = $title"); }
        if data.base_price.is_some() { set_parts.push("base_price = $base_price"); }
        if data.offer_price.is_some() { set_parts.push("offer_price = $offer_price"); }
        if data.category.is_some() { set_parts.push("category = $category"); }
        if data.subcategory.is_some() { set_parts.push("subcategory = $subcategory"); }
        if data.material.is_some() { set_parts.push("material = $material"); }
        if data.style.is_some() { set_parts.push("style = $style"); }
        if data.occasion.is_some() { set_parts.push("occasion = $occasion"); }
        if data.stock.is_some() { set_parts.push("stock = $stock"); }
        if data.sku.is_some() { set_parts.push("sku = $sku"); }
        if data.sizes.is_some() { set_parts.push("sizes = $sizes"); }
        if data.styles.is_some() { set_parts.push("styles = $styles"); }
        if data.images.is_some() { set_parts.push("images = $images"); }
        if data.featured_image.is_some() { set_parts.push("featured_image = $featured_image"); }
        if data.is_active.is_some() { set_parts.push("is_active = $is_active"); }
        if data.is_available.is_some() { set_parts.push("is_available = $is_available"); }
        if data.is_featured.is_some() { set_parts.push("is_featured = $is_featured"); }
        if data.is_best_seller.is_some() { set_parts.push("is_best_seller = $is_best_seller"); }
        if data.is_new_arrival.is_some() { set_parts.push("is_new_arrival = $is_new_arrival"); }

        if set_parts.is_empty() {
            return self
                .find_by_id(&pure_id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)));
        }

        let query_str = format!(
            "UPDATE type::thing('product', $pure_id) SET {} RETURN AFTER",
            set_parts.join(", ")
        );

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("pure_id", pure_id));

        if let Some(v) = data.title { query = query.bind(("title", v)); }
        if let Some(v) = data.base_price { query = query.bind(("base_price", v)); }
        if let Some(v) = data.offer_price { query = query.bind(("offer_price", v)); }
        if let Some(v) = data.category { query = query.bind(("category", v)); }
        if let Some(v) = data.subcategory { query = query.bind(("subcategory", v)); }
        if let Some(v) = data.material { query = query.bind(("material", v)); }
        if let Some(v) = data.style { query = query.bind(("style", v)); }
        if let Some(v) = data.occasion { query = query.bind(("occasion", v)); }
        if let Some(v) = data.stock { query = query.bind(("stock", v)); }
        if let Some(v) = data.sku { query = query.bind(("sku", v)); }
        if let Some(v) = data.sizes { query = query.bind(("sizes", v)); }
        if let Some(v) = data.styles { query = query.bind(("styles", v)); }
        if let Some(v) = data.images { query = query.bind(("images", v)); }
        if let Some(v) = data.featured_image { query = query.bind(("featured_image", v)); }
        if let Some(v) = data.is_active { query = query.bind(("is_active", v)); }
        if let Some(v) = data.is_available { query = query.bind(("is_available", v)); }
        if let Some(v) = data.is_featured { query = query.bind(("is_featured", v)); }
        if let Some(v) = data.is_best_seller { query = query.bind(("is_best_seller", v)); }
        if let Some(v) = data.is_new_arrival { query = query.bind(("is_new_arrival", v)); }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Soft delete: clear the active/available flags, keep the document
    pub async fn soft_delete(&self, id: &str) -> RepoResult<Product> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing('product', $pure_id) \
                 SET is_active = false, is_available = false RETURN AFTER",
            )
            .bind(("pure_id", pure_id))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }
}
