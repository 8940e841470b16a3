//! Database Models
//!
//! Serde models matching the SurrealDB tables, plus Create/Update DTOs.

pub mod serde_helpers;

pub mod admin;
pub mod banner;
pub mod category;
pub mod order;
pub mod product;

pub use admin::{AdminUser, AdminUserId};
pub use banner::{
    Banner, BannerCreate, BannerId, BannerRef, BannerType, BannerUpdate, DEFAULT_BANNER_KEYS,
    default_banners, merge_with_defaults,
};
pub use category::{
    Category, CategoryCreate, CategoryId, CategoryName, CategoryUpdate, CategoryWithCount,
};
pub use order::{
    Order, OrderAddress, OrderCancelRequest, OrderCreate, OrderCustomer, OrderId, OrderItem,
    OrderPayment, OrderStatus, OrderStatusUpdate, OrderTrackView, OrderTracking, PaymentStatus,
};
pub use product::{
    CategoryFacet, Product, ProductCreate, ProductId, ProductPage, ProductQuery, ProductUpdate,
    SizeOption, StyleOption,
};
