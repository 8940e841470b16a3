//! Database Module
//!
//! Embedded SurrealDB storage: RocksDB on disk at runtime, in-memory engine
//! for tests. Schema definition is idempotent and runs on every startup.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "framery";
const DATABASE: &str = "storefront";

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database under `db_dir`
    pub async fn new(db_dir: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_dir)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!(path = %db_dir.display(), "Database connection established (SurrealDB/RocksDB)");
        Ok(Self { db })
    }

    /// In-memory database for tests
    pub async fn new_memory() -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open memory database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;
        Ok(Self { db })
    }
}

/// Idempotent schema setup: unique indexes backing the invariants the
/// repositories rely on (SKU uniqueness, order-number uniqueness).
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE INDEX IF NOT EXISTS uniq_product_sku ON TABLE product FIELDS sku UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_order_number ON TABLE order FIELDS order_number UNIQUE;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

    tracing::info!("Database schema applied");
    Ok(())
}
