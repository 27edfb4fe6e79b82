//! Database Module
//!
//! Owns the embedded SurrealDB (RocksDB) handle and applies the schema at
//! startup.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use shared::{AppError, AppResult};

const NAMESPACE: &str = "tavola";
const DATABASE: &str = "marketplace";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database under `path` and apply the schema
    pub async fn new(path: &Path) -> AppResult<Self> {
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database opened at {}", path.display());

        apply_schema(&db).await?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }

    pub fn db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}

/// Table and index definitions, applied idempotently at startup
async fn apply_schema(db: &Surreal<Db>) -> AppResult<()> {
    let statements = [
        "DEFINE TABLE IF NOT EXISTS user_account SCHEMALESS",
        "DEFINE TABLE IF NOT EXISTS customer SCHEMALESS",
        "DEFINE TABLE IF NOT EXISTS restaurant SCHEMALESS",
        "DEFINE TABLE IF NOT EXISTS dish SCHEMALESS",
        "DEFINE TABLE IF NOT EXISTS voucher SCHEMALESS",
        "DEFINE TABLE IF NOT EXISTS order SCHEMALESS",
        "DEFINE TABLE IF NOT EXISTS order_item SCHEMALESS",
        "DEFINE TABLE IF NOT EXISTS order_status_history SCHEMALESS",
        "DEFINE TABLE IF NOT EXISTS daily_counter SCHEMALESS",
        // Account emails and voucher codes are unique
        "DEFINE INDEX IF NOT EXISTS user_email_unique ON user_account FIELDS email UNIQUE",
        "DEFINE INDEX IF NOT EXISTS voucher_code_unique ON voucher FIELDS code UNIQUE",
        // Lookup paths
        "DEFINE INDEX IF NOT EXISTS customer_user ON customer FIELDS user",
        "DEFINE INDEX IF NOT EXISTS restaurant_owner ON restaurant FIELDS owner",
        "DEFINE INDEX IF NOT EXISTS dish_restaurant ON dish FIELDS restaurant",
        "DEFINE INDEX IF NOT EXISTS order_restaurant_date ON order FIELDS restaurant, order_date",
        "DEFINE INDEX IF NOT EXISTS order_customer ON order FIELDS customer",
        "DEFINE INDEX IF NOT EXISTS order_item_order ON order_item FIELDS order_id",
        "DEFINE INDEX IF NOT EXISTS history_order ON order_status_history FIELDS order_id",
    ];

    for statement in statements {
        db.query(statement)
            .await
            .map_err(|e| AppError::database(format!("Schema statement failed: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Schema statement failed: {e}")))?;
    }

    Ok(())
}
