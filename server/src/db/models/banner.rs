//! Banner Model
//!
//! 三条硬编码默认横幅 + 数据库覆盖记录 (copy-on-write)。
//! 管理端第一次编辑/停用某条默认横幅时才物化覆盖记录，
//! 之后的读路径按条目合并覆盖与默认。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Banner ID type
pub type BannerId = RecordId;

/// Banner display type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BannerType {
    Hero,
    Promotional,
}

/// Banner entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<BannerId>,
    pub title: String,
    pub subtitle: Option<String>,
    pub image: String,
    pub link: Option<String>,
    pub link_text: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    pub banner_type: BannerType,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
    /// Free-form CSS-ish overrides (text color, overlay opacity, ...)
    pub style_overrides: Option<serde_json::Value>,
    /// Back-reference to one of the hardcoded defaults ("1" | "2" | "3");
    /// at most one stored record carries each key
    pub default_key: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Create banner payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerCreate {
    pub title: String,
    pub subtitle: Option<String>,
    pub image: String,
    pub link: Option<String>,
    pub link_text: Option<String>,
    pub display_order: Option<i32>,
    pub banner_type: BannerType,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
    pub style_overrides: Option<serde_json::Value>,
}

/// Update banner payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BannerUpdate {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub link_text: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    pub banner_type: Option<BannerType>,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
    pub style_overrides: Option<serde_json::Value>,
}

/// Reference to a banner, decided once at the API boundary instead of
/// format-sniffing ids inside handlers
#[derive(Debug, Clone, PartialEq)]
pub enum BannerRef {
    /// A database-assigned record
    Stored(RecordId),
    /// One of the fixed default keys ("1" | "2" | "3")
    Default(&'static str),
}

impl BannerRef {
    /// Parse a path id: default keys take priority, everything else must be
    /// a banner record id (bare or "banner:..." form)
    pub fn parse(id: &str) -> Option<Self> {
        for key in DEFAULT_BANNER_KEYS {
            if id == *key {
                return Some(BannerRef::Default(key));
            }
        }
        let pure_id = id.strip_prefix("banner:").unwrap_or(id);
        if pure_id.is_empty() {
            return None;
        }
        Some(BannerRef::Stored(RecordId::from_table_key(
            "banner", pure_id,
        )))
    }
}

/// Fixed default identifiers
pub const DEFAULT_BANNER_KEYS: &[&str] = &["1", "2", "3"];

/// The hardcoded defaults shown until an override is materialized
pub fn default_banners() -> Vec<Banner> {
    vec![
        Banner {
            id: None,
            title: "Frame Your Story".to_string(),
            subtitle: Some("Handcrafted frames for every memory".to_string()),
            image: "/public/banners/default-hero-1.jpg".to_string(),
            link: Some("/products?category=frames".to_string()),
            link_text: Some("Shop Frames".to_string()),
            display_order: 1,
            is_active: true,
            banner_type: BannerType::Hero,
            valid_from: None,
            valid_until: None,
            style_overrides: None,
            default_key: Some("1".to_string()),
        },
        Banner {
            id: None,
            title: "Wall Art Collection".to_string(),
            subtitle: Some("Curated prints and originals".to_string()),
            image: "/public/banners/default-hero-2.jpg".to_string(),
            link: Some("/products?category=wall-art".to_string()),
            link_text: Some("Explore Art".to_string()),
            display_order: 2,
            is_active: true,
            banner_type: BannerType::Hero,
            valid_from: None,
            valid_until: None,
            style_overrides: None,
            default_key: Some("2".to_string()),
        },
        Banner {
            id: None,
            title: "Festive Offers".to_string(),
            subtitle: Some("Up to 40% off selected pieces".to_string()),
            image: "/public/banners/default-promo-1.jpg".to_string(),
            link: Some("/products?sort_by=price".to_string()),
            link_text: Some("View Offers".to_string()),
            display_order: 3,
            is_active: true,
            banner_type: BannerType::Promotional,
            valid_from: None,
            valid_until: None,
            style_overrides: None,
            default_key: Some("3".to_string()),
        },
    ]
}

/// Merge stored records into the default list, per entry.
///
/// A stored record carrying a `default_key` replaces (or, when inactive,
/// suppresses) the matching default; genuine stored banners are appended.
/// Inactive genuine banners are filtered out. The result is sorted by
/// `display_order`.
pub fn merge_with_defaults(stored: Vec<Banner>) -> Vec<Banner> {
    let mut merged: Vec<Banner> = Vec::new();

    for default in default_banners() {
        let key = default.default_key.as_deref().unwrap_or_default();
        match stored
            .iter()
            .find(|b| b.default_key.as_deref() == Some(key))
        {
            Some(over) if over.is_active => merged.push(over.clone()),
            Some(_) => {} // disabled override suppresses the default
            None => merged.push(default),
        }
    }

    for banner in stored {
        if banner.default_key.is_none() && banner.is_active {
            merged.push(banner);
        }
    }

    merged.sort_by_key(|b| b.display_order);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(default_key: Option<&str>, active: bool, order: i32) -> Banner {
        Banner {
            id: Some(RecordId::from_table_key("banner", format!("b{order}"))),
            title: format!("stored-{order}"),
            subtitle: None,
            image: String::new(),
            link: None,
            link_text: None,
            display_order: order,
            is_active: active,
            banner_type: BannerType::Hero,
            valid_from: None,
            valid_until: None,
            style_overrides: None,
            default_key: default_key.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_empty_store_falls_back_to_defaults() {
        let merged = merge_with_defaults(vec![]);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].default_key.as_deref(), Some("1"));
    }

    #[test]
    fn test_override_replaces_matching_default() {
        let merged = merge_with_defaults(vec![stored(Some("2"), true, 2)]);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1].title, "stored-2");
    }

    #[test]
    fn test_disabled_override_suppresses_default() {
        let merged = merge_with_defaults(vec![stored(Some("2"), false, 2)]);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|b| b.default_key.as_deref() != Some("2")));
    }

    #[test]
    fn test_genuine_banners_appended_and_sorted() {
        let merged = merge_with_defaults(vec![stored(None, true, 0)]);
        assert_eq!(merged.len(), 4);
        assert_eq!(merged[0].title, "stored-0");
    }

    #[test]
    fn test_banner_ref_parse() {
        assert_eq!(BannerRef::parse("2"), Some(BannerRef::Default("2")));
        assert_eq!(
            BannerRef::parse("banner:abc"),
            Some(BannerRef::Stored(RecordId::from_table_key("banner", "abc")))
        );
        assert_eq!(
            BannerRef::parse("abc"),
            Some(BannerRef::Stored(RecordId::from_table_key("banner", "abc")))
        );
        assert_eq!(BannerRef::parse(""), None);
    }
}
