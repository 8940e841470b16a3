//! 横幅覆盖集成测试：copy-on-write 物化、默认条目停用、顺序互换
//! Run: cargo test -p framery-server --test banner_overrides

use framery_server::db::DbService;
use framery_server::db::models::{
    BannerCreate, BannerRef, BannerType, BannerUpdate, merge_with_defaults,
};
use framery_server::db::repository::BannerRepository;

fn title_patch(title: &str) -> BannerUpdate {
    BannerUpdate {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn editing_a_default_materializes_exactly_one_override() {
    let db = DbService::new_memory().await.unwrap();
    let repo = BannerRepository::new(db.db.clone());

    assert!(repo.find_all_stored().await.unwrap().is_empty());

    let first = repo
        .update(&BannerRef::Default("1"), title_patch("Summer Frames"))
        .await
        .unwrap();
    assert_eq!(first.title, "Summer Frames");
    assert_eq!(first.default_key.as_deref(), Some("1"));

    // a second edit patches the same record instead of materializing again
    let second = repo
        .update(&BannerRef::Default("1"), title_patch("Winter Frames"))
        .await
        .unwrap();
    assert_eq!(second.title, "Winter Frames");
    assert_eq!(repo.find_all_stored().await.unwrap().len(), 1);

    let merged = merge_with_defaults(repo.find_all_stored().await.unwrap());
    assert_eq!(merged.len(), 3);
    assert_eq!(merged[0].title, "Winter Frames");
}

#[tokio::test]
async fn deleting_a_default_suppresses_it_from_the_merged_list() {
    let db = DbService::new_memory().await.unwrap();
    let repo = BannerRepository::new(db.db.clone());

    repo.delete(&BannerRef::Default("2")).await.unwrap();

    // the inactive override exists in storage but never reaches the storefront
    let over = repo.find_by_default_key("2").await.unwrap().unwrap();
    assert!(!over.is_active);

    let merged = merge_with_defaults(repo.find_all_stored().await.unwrap());
    assert_eq!(merged.len(), 2);
    assert!(merged.iter().all(|b| b.default_key.as_deref() != Some("2")));
}

#[tokio::test]
async fn genuine_banner_is_hard_deleted() {
    let db = DbService::new_memory().await.unwrap();
    let repo = BannerRepository::new(db.db.clone());

    let created = repo
        .create(BannerCreate {
            title: "Diwali Sale".to_string(),
            subtitle: None,
            image: "/public/banners/diwali.jpg".to_string(),
            link: None,
            link_text: None,
            display_order: Some(9),
            banner_type: BannerType::Promotional,
            valid_from: None,
            valid_until: None,
            style_overrides: None,
        })
        .await
        .unwrap();
    assert!(created.default_key.is_none());

    let key = created.id.as_ref().unwrap().key().to_string();
    repo.delete(&BannerRef::parse(&key).unwrap()).await.unwrap();
    assert!(repo.find_all_stored().await.unwrap().is_empty());
}

#[tokio::test]
async fn reorder_swaps_display_order_of_two_records() {
    let db = DbService::new_memory().await.unwrap();
    let repo = BannerRepository::new(db.db.clone());

    // materialize default 1 so it has a record to reorder
    let over = repo
        .update(&BannerRef::Default("1"), title_patch("Hero One"))
        .await
        .unwrap();
    let genuine = repo
        .create(BannerCreate {
            title: "Late Addition".to_string(),
            subtitle: None,
            image: "/public/banners/late.jpg".to_string(),
            link: None,
            link_text: None,
            display_order: Some(7),
            banner_type: BannerType::Hero,
            valid_from: None,
            valid_until: None,
            style_overrides: None,
        })
        .await
        .unwrap();

    let genuine_key = genuine.id.as_ref().unwrap().key().to_string();
    repo.swap_display_order("1", &genuine_key).await.unwrap();

    let swapped_over = repo.find_by_default_key("1").await.unwrap().unwrap();
    let swapped_genuine = repo
        .find_by_ref(&BannerRef::parse(&genuine_key).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(swapped_over.display_order, 7);
    assert_eq!(swapped_genuine.display_order, over.display_order);
}

#[tokio::test]
async fn reordering_unmaterialized_defaults_materializes_overrides() {
    let db = DbService::new_memory().await.unwrap();
    let repo = BannerRepository::new(db.db.clone());

    // neither default has a stored record yet; reorder triggers copy-on-write
    assert!(repo.find_all_stored().await.unwrap().is_empty());
    repo.swap_display_order("1", "2").await.unwrap();

    let one = repo.find_by_default_key("1").await.unwrap().unwrap();
    let two = repo.find_by_default_key("2").await.unwrap().unwrap();
    assert_eq!(one.display_order, 2);
    assert_eq!(two.display_order, 1);
    assert_eq!(repo.find_all_stored().await.unwrap().len(), 2);
}
