//! Banner Repository
//!
//! 默认横幅的覆盖记录在第一次编辑时物化，每个 default_key 最多一条

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    Banner, BannerCreate, BannerRef, BannerType, BannerUpdate, default_banners,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const BANNER_TABLE: &str = "banner";

#[derive(Clone)]
pub struct BannerRepository {
    base: BaseRepository,
}

impl BannerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All stored records, overrides included, sorted by display order
    pub async fn find_all_stored(&self) -> RepoResult<Vec<Banner>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM banner ORDER BY display_order ASC")
            .await?;
        let banners: Vec<Banner> = result.take(0)?;
        Ok(banners)
    }

    pub async fn find_by_ref(&self, banner_ref: &BannerRef) -> RepoResult<Option<Banner>> {
        match banner_ref {
            BannerRef::Stored(id) => {
                let banner: Option<Banner> = self
                    .base
                    .db()
                    .select((BANNER_TABLE, id.key().to_string()))
                    .await?;
                Ok(banner)
            }
            BannerRef::Default(key) => self.find_by_default_key(key).await,
        }
    }

    /// The materialized override for one default key, if it exists
    pub async fn find_by_default_key(&self, key: &str) -> RepoResult<Option<Banner>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM banner WHERE default_key = $key LIMIT 1")
            .bind(("key", key.to_string()))
            .await?;
        let banners: Vec<Banner> = result.take(0)?;
        Ok(banners.into_iter().next())
    }

    /// Create a genuine (non-default) banner
    pub async fn create(&self, data: BannerCreate) -> RepoResult<Banner> {
        if data.title.trim().is_empty() {
            return Err(RepoError::Validation("title cannot be empty".into()));
        }
        let banner = Banner {
            id: None,
            title: data.title,
            subtitle: data.subtitle,
            image: data.image,
            link: data.link,
            link_text: data.link_text,
            display_order: data.display_order.unwrap_or(0),
            is_active: true,
            banner_type: data.banner_type,
            valid_from: data.valid_from,
            valid_until: data.valid_until,
            style_overrides: data.style_overrides,
            default_key: None,
        };
        let created: Option<Banner> = self.base.db().create(BANNER_TABLE).content(banner).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create banner".to_string()))
    }

    /// Update through a reference. Editing a default that has no stored
    /// override yet materializes one first (copy-on-write), then the patch is
    /// applied to that record.
    pub async fn update(&self, banner_ref: &BannerRef, data: BannerUpdate) -> RepoResult<Banner> {
        let target = match banner_ref {
            BannerRef::Stored(id) => {
                let existing: Option<Banner> = self
                    .base
                    .db()
                    .select((BANNER_TABLE, id.key().to_string()))
                    .await?;
                existing.ok_or_else(|| RepoError::NotFound("Banner not found".to_string()))?
            }
            BannerRef::Default(key) => match self.find_by_default_key(key).await? {
                Some(over) => over,
                None => self.materialize_default(key).await?,
            },
        };

        let record_id = target
            .id
            .ok_or_else(|| RepoError::Database("Stored banner has no id".to_string()))?;
        let patched = Banner {
            id: None,
            title: data.title.unwrap_or(target.title),
            subtitle: data.subtitle.or(target.subtitle),
            image: data.image.unwrap_or(target.image),
            link: data.link.or(target.link),
            link_text: data.link_text.or(target.link_text),
            display_order: data.display_order.unwrap_or(target.display_order),
            is_active: data.is_active.unwrap_or(target.is_active),
            banner_type: data.banner_type.unwrap_or(target.banner_type),
            valid_from: data.valid_from.or(target.valid_from),
            valid_until: data.valid_until.or(target.valid_until),
            style_overrides: data.style_overrides.or(target.style_overrides),
            default_key: target.default_key,
        };

        let updated: Option<Banner> = self
            .base
            .db()
            .update((BANNER_TABLE, record_id.key().to_string()))
            .content(patched)
            .await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update banner".to_string()))
    }

    /// Copy one hardcoded default into a stored override record
    async fn materialize_default(&self, key: &str) -> RepoResult<Banner> {
        let default = default_banners()
            .into_iter()
            .find(|b| b.default_key.as_deref() == Some(key))
            .ok_or_else(|| RepoError::NotFound(format!("No default banner with key {key}")))?;
        let created: Option<Banner> = self.base.db().create(BANNER_TABLE).content(default).await?;
        created.ok_or_else(|| RepoError::Database("Failed to materialize banner".to_string()))
    }

    /// Delete through a reference. Genuine records are removed outright; a
    /// default is "deleted" by materializing an inactive override so the read
    /// path suppresses it.
    pub async fn delete(&self, banner_ref: &BannerRef) -> RepoResult<()> {
        match banner_ref {
            BannerRef::Stored(id) => {
                let deleted: Option<Banner> = self
                    .base
                    .db()
                    .delete((BANNER_TABLE, id.key().to_string()))
                    .await?;
                deleted.ok_or_else(|| RepoError::NotFound("Banner not found".to_string()))?;
                Ok(())
            }
            BannerRef::Default(key) => {
                let over = match self.find_by_default_key(key).await? {
                    Some(over) => over,
                    None => self.materialize_default(key).await?,
                };
                let record_id = over
                    .id
                    .ok_or_else(|| RepoError::Database("Stored banner has no id".to_string()))?;
                self.base
                    .db()
                    .query(
                        "UPDATE type::thing('banner', $pure_id) SET is_active = false RETURN AFTER",
                    )
                    .bind(("pure_id", record_id.key().to_string()))
                    .await?;
                Ok(())
            }
        }
    }

    /// Resolve a reference to a stored record for reordering. A default with
    /// no override yet gets one materialized, same as edit and disable.
    async fn resolve_for_reorder(&self, raw: &str) -> RepoResult<Banner> {
        let banner_ref = BannerRef::parse(raw)
            .ok_or_else(|| RepoError::Validation("Invalid banner id".into()))?;
        match &banner_ref {
            BannerRef::Stored(_) => self
                .find_by_ref(&banner_ref)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Banner {raw} not found"))),
            BannerRef::Default(key) => match self.find_by_default_key(key).await? {
                Some(over) => Ok(over),
                None => self.materialize_default(key).await,
            },
        }
    }

    /// Swap the display_order of two stored records in one transaction, so a
    /// concurrent read never sees both carrying the same slot
    pub async fn swap_display_order(&self, first: &str, second: &str) -> RepoResult<()> {
        let a = self.resolve_for_reorder(first).await?;
        let b = self.resolve_for_reorder(second).await?;

        let a_id = a
            .id
            .as_ref()
            .ok_or_else(|| RepoError::Database("Stored banner has no id".to_string()))?
            .key()
            .to_string();
        let b_id = b
            .id
            .as_ref()
            .ok_or_else(|| RepoError::Database("Stored banner has no id".to_string()))?
            .key()
            .to_string();

        self.base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 UPDATE type::thing('banner', $a_id) SET display_order = $b_order; \
                 UPDATE type::thing('banner', $b_id) SET display_order = $a_order; \
                 COMMIT TRANSACTION;",
            )
            .bind(("a_id", a_id))
            .bind(("b_id", b_id))
            .bind(("a_order", a.display_order))
            .bind(("b_order", b.display_order))
            .await?;
        Ok(())
    }

    /// Optional type filter applied after the merge happens in the handler
    pub fn filter_by_type(banners: Vec<Banner>, banner_type: Option<BannerType>) -> Vec<Banner> {
        match banner_type {
            Some(t) => banners.into_iter().filter(|b| b.banner_type == t).collect(),
            None => banners,
        }
    }
}
