//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate, CategoryWithCount};
use std::collections::HashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CATEGORY_TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

#[derive(serde::Deserialize)]
struct FacetRow {
    category: String,
    count: i64,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Active categories with live product counts. Counts are derived from
    /// active/available products every time, never stored.
    pub async fn find_all_with_counts(&self) -> RepoResult<Vec<CategoryWithCount>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE is_active = true ORDER BY display_order ASC")
            .query(
                "SELECT category, count() AS count FROM product \
                 WHERE is_active = true AND is_available = true GROUP BY category",
            )
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        let facets: Vec<FacetRow> = result.take(1)?;

        let counts: HashMap<String, i64> =
            facets.into_iter().map(|f| (f.category, f.count)).collect();

        Ok(categories
            .into_iter()
            .map(|category| {
                let product_count = counts.get(category.slug.as_str()).copied().unwrap_or(0);
                CategoryWithCount {
                    category,
                    product_count,
                }
            })
            .collect())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let pure_id = strip_table_prefix(CATEGORY_TABLE, id);
        let category: Option<Category> = self.base.db().select((CATEGORY_TABLE, pure_id)).await?;
        Ok(category)
    }

    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a category. The slug defaults to the fixed name's kebab form
    /// and must stay unique.
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        let slug = data
            .slug
            .unwrap_or_else(|| data.name.as_str().to_string());
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "A category with slug {slug} already exists"
            )));
        }

        let category = Category {
            id: None,
            name: data.name,
            slug,
            description: data.description,
            image: data.image.unwrap_or_default(),
            display_order: data.display_order.unwrap_or(0),
            is_active: true,
        };
        let created: Option<Category> = self
            .base
            .db()
            .create(CATEGORY_TABLE)
            .content(category)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let pure_id = strip_table_prefix(CATEGORY_TABLE, id).to_string();

        if let Some(ref slug) = data.slug
            && let Some(existing) = self.find_by_slug(slug).await?
            && existing.id.as_ref().map(|r| r.key().to_string()) != Some(pure_id.clone())
        {
            return Err(RepoError::Duplicate(format!(
                "A category with slug {slug} already exists"
            )));
        }

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() { set_parts.push("name = $name"); }
        if data.slug.is_some() { set_parts.push("slug = $slug"); }
        if data.description.is_some() { set_parts.push("description = $description"); }
        if data.image.is_some() { set_parts.push("image = $image"); }
        if data.display_order.is_some() { set_parts.push("display_order = $display_order"); }
        if data.is_active.is_some() { set_parts.push("is_active = $is_active"); }

        if set_parts.is_empty() {
            return self
                .find_by_id(&pure_id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)));
        }

        let query_str = format!(
            "UPDATE type::thing('category', $pure_id) SET {} RETURN AFTER",
            set_parts.join(", ")
        );
        let mut query = self.base.db().query(&query_str).bind(("pure_id", pure_id));
        if let Some(v) = data.name { query = query.bind(("name", v)); }
        if let Some(v) = data.slug { query = query.bind(("slug", v)); }
        if let Some(v) = data.description { query = query.bind(("description", v)); }
        if let Some(v) = data.image { query = query.bind(("image", v)); }
        if let Some(v) = data.display_order { query = query.bind(("display_order", v)); }
        if let Some(v) = data.is_active { query = query.bind(("is_active", v)); }

        let mut result = query.await?;
        let categories: Vec<Category> = result.take(0)?;
        categories
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(CATEGORY_TABLE, id);
        let deleted: Option<Category> = self
            .base
            .db()
            .delete((CATEGORY_TABLE, pure_id))
            .await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;
        Ok(())
    }
}
