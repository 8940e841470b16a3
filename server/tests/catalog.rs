//! 商品目录集成测试：SKU 唯一、软删除、过滤分面、分类实时计数
//! Run: cargo test -p framery-server --test catalog

use framery_server::db::DbService;
use framery_server::db::models::{
    CategoryCreate, CategoryName, ProductCreate, ProductQuery, ProductUpdate, SizeOption,
    StyleOption,
};
use framery_server::db::repository::{CategoryRepository, ProductRepository, RepoError};

fn sample_product(sku: &str, category: &str, base_price: f64) -> ProductCreate {
    ProductCreate {
        title: format!("Product {sku}"),
        base_price,
        offer_price: None,
        category: category.to_string(),
        subcategory: None,
        material: None,
        style: None,
        occasion: None,
        stock: Some(10),
        sku: sku.to_string(),
        sizes: None,
        styles: None,
        images: Some(vec![format!("/public/products/{sku}.jpg")]),
        featured_image: None,
        is_featured: None,
        is_best_seller: None,
        is_new_arrival: None,
    }
}

#[tokio::test]
async fn duplicate_sku_is_rejected() {
    let db = DbService::new_memory().await.unwrap();
    let repo = ProductRepository::new(db.db.clone());

    repo.create(sample_product("FRM-001", "frames", 999.0))
        .await
        .unwrap();
    let err = repo
        .create(sample_product("FRM-001", "frames", 1299.0))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    // changing another product's SKU onto an existing one must also fail
    let other = repo
        .create(sample_product("FRM-002", "frames", 499.0))
        .await
        .unwrap();
    let err = repo
        .update(
            &other.id.as_ref().unwrap().key().to_string(),
            ProductUpdate {
                sku: Some("FRM-001".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn missing_featured_image_falls_back_to_first_gallery_image() {
    let db = DbService::new_memory().await.unwrap();
    let repo = ProductRepository::new(db.db.clone());

    let created = repo
        .create(sample_product("FRM-010", "frames", 999.0))
        .await
        .unwrap();
    assert_eq!(created.featured_image, "/public/products/FRM-010.jpg");
}

#[tokio::test]
async fn size_and_style_options_round_trip_in_order() {
    let db = DbService::new_memory().await.unwrap();
    let repo = ProductRepository::new(db.db.clone());

    let mut payload = sample_product("FRM-020", "frames", 999.0);
    payload.sizes = Some(vec![
        SizeOption {
            label: "8x10 in".to_string(),
            price: 999.0,
            offer_price: Some(899.0),
            dimensions: Some("8x10 in".to_string()),
        },
        SizeOption {
            label: "12x18 in".to_string(),
            price: 1499.0,
            offer_price: None,
            dimensions: None,
        },
    ]);
    payload.styles = Some(vec![StyleOption {
        label: "Gold leaf".to_string(),
        additional_price: 250.0,
    }]);

    let created = repo.create(payload).await.unwrap();
    let fetched = repo
        .find_by_id(&created.id.as_ref().unwrap().key().to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.sizes.len(), 2);
    assert_eq!(fetched.sizes[0].label, "8x10 in");
    assert_eq!(fetched.sizes[0].offer_price, Some(899.0));
    assert_eq!(fetched.styles[0].label, "Gold leaf");
    assert_eq!(fetched.styles[0].additional_price, 250.0);
}

#[tokio::test]
async fn soft_deleted_product_leaves_listing_but_stays_retrievable() {
    let db = DbService::new_memory().await.unwrap();
    let repo = ProductRepository::new(db.db.clone());

    let keep = repo
        .create(sample_product("FRM-100", "frames", 999.0))
        .await
        .unwrap();
    let gone = repo
        .create(sample_product("FRM-101", "frames", 1299.0))
        .await
        .unwrap();
    let gone_id = gone.id.as_ref().unwrap().key().to_string();

    let deleted = repo.soft_delete(&gone_id).await.unwrap();
    assert!(!deleted.is_active);
    assert!(!deleted.is_available);

    let page = repo.find_page(&ProductQuery::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.products[0].sku, keep.sku);

    // an out-of-range page is an empty result, never an arithmetic panic
    let far = repo
        .find_page(&ProductQuery {
            page: Some(u32::MAX),
            limit: Some(100),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(far.products.is_empty());

    // historical orders still need the document
    let by_id = repo.find_by_id(&gone_id).await.unwrap().unwrap();
    assert_eq!(by_id.sku, "FRM-101");
}

#[tokio::test]
async fn listing_filters_and_facets() {
    let db = DbService::new_memory().await.unwrap();
    let repo = ProductRepository::new(db.db.clone());

    repo.create(sample_product("A-1", "frames", 500.0)).await.unwrap();
    repo.create(sample_product("A-2", "frames", 1500.0)).await.unwrap();
    repo.create(sample_product("B-1", "wall-art", 2500.0)).await.unwrap();

    let by_category = repo
        .find_page(&ProductQuery {
            category: Some("frames".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_category.total, 2);

    let by_price = repo
        .find_page(&ProductQuery {
            min_price: Some(1000.0),
            max_price: Some(2000.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_price.total, 1);
    assert_eq!(by_price.products[0].sku, "A-2");
    assert_eq!(by_price.min_price, Some(1500.0));

    let all = repo.find_page(&ProductQuery::default()).await.unwrap();
    let frames_facet = all
        .facets
        .iter()
        .find(|f| f.category == "frames")
        .unwrap();
    assert_eq!(frames_facet.count, 2);

    let cheapest_first = repo
        .find_page(&ProductQuery {
            sort_by: Some("price".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(cheapest_first.products[0].sku, "A-1");
}

#[tokio::test]
async fn search_matches_title_case_insensitively() {
    let db = DbService::new_memory().await.unwrap();
    let repo = ProductRepository::new(db.db.clone());

    let mut walnut = sample_product("W-1", "frames", 999.0);
    walnut.title = "Walnut Classic Frame".to_string();
    repo.create(walnut).await.unwrap();
    repo.create(sample_product("O-1", "frames", 499.0)).await.unwrap();

    let hits = repo
        .find_page(&ProductQuery {
            search: Some("walnut".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(hits.total, 1);
    assert_eq!(hits.products[0].sku, "W-1");
}

#[tokio::test]
async fn category_counts_are_derived_live() {
    let db = DbService::new_memory().await.unwrap();
    let products = ProductRepository::new(db.db.clone());
    let categories = CategoryRepository::new(db.db.clone());

    categories
        .create(CategoryCreate {
            name: CategoryName::Frames,
            slug: None,
            description: None,
            image: None,
            display_order: Some(1),
        })
        .await
        .unwrap();
    categories
        .create(CategoryCreate {
            name: CategoryName::WallArt,
            slug: None,
            description: None,
            image: None,
            display_order: Some(2),
        })
        .await
        .unwrap();

    let a = products
        .create(sample_product("C-1", "frames", 999.0))
        .await
        .unwrap();
    products
        .create(sample_product("C-2", "frames", 1299.0))
        .await
        .unwrap();

    let listed = categories.find_all_with_counts().await.unwrap();
    let frames = listed
        .iter()
        .find(|c| c.category.slug == "frames")
        .unwrap();
    let wall_art = listed
        .iter()
        .find(|c| c.category.slug == "wall-art")
        .unwrap();
    assert_eq!(frames.product_count, 2);
    assert_eq!(wall_art.product_count, 0);

    // soft delete shrinks the count on the next read, no stored counter
    products
        .soft_delete(&a.id.as_ref().unwrap().key().to_string())
        .await
        .unwrap();
    let listed = categories.find_all_with_counts().await.unwrap();
    let frames = listed
        .iter()
        .find(|c| c.category.slug == "frames")
        .unwrap();
    assert_eq!(frames.product_count, 1);
}

#[tokio::test]
async fn duplicate_category_slug_is_rejected() {
    let db = DbService::new_memory().await.unwrap();
    let repo = CategoryRepository::new(db.db.clone());

    repo.create(CategoryCreate {
        name: CategoryName::Frames,
        slug: None,
        description: None,
        image: None,
        display_order: None,
    })
    .await
    .unwrap();

    let err = repo
        .create(CategoryCreate {
            name: CategoryName::Frames,
            slug: None,
            description: None,
            image: None,
            display_order: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}
