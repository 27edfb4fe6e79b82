//! Voucher repository
//!
//! The usage counter is only ever moved by `increment_usage`, a single
//! conditional UPDATE checked via rows-affected, so the cap cannot be
//! overshot by a read-then-increment race.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Voucher;
use shared::models::DiscountType;

#[derive(Clone)]
pub struct VoucherRepository {
    base: BaseRepository,
}

/// Create voucher payload, code already normalized
#[derive(Debug, Clone)]
pub struct NewVoucher {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub valid_from: String,
    pub valid_until: String,
    pub usage_limit: Option<i64>,
    pub restaurant: Option<RecordId>,
}

impl VoucherRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find voucher by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Voucher>> {
        let voucher: Option<Voucher> = self.base.db().select(id.clone()).await?;
        Ok(voucher)
    }

    /// Find voucher by code, case-insensitively
    ///
    /// Codes are stored uppercase; the lookup normalizes before matching.
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Voucher>> {
        let normalized = code.trim().to_uppercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM voucher WHERE code = $code LIMIT 1")
            .bind(("code", normalized))
            .await?;
        let vouchers: Vec<Voucher> = result.take(0)?;
        Ok(vouchers.into_iter().next())
    }

    /// Create a voucher
    pub async fn create(&self, data: NewVoucher) -> RepoResult<Voucher> {
        let code = data.code.trim().to_uppercase();
        // Duplicate check first for a clean error; the unique index backstops
        if self.find_by_code(&code).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Voucher code '{}' already exists",
                code
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                "CREATE voucher SET
                    code = $code,
                    discount_type = $discount_type,
                    discount_value = $discount_value,
                    is_active = true,
                    valid_from = $valid_from,
                    valid_until = $valid_until,
                    usage_limit = $usage_limit,
                    usage_count = 0,
                    restaurant = $restaurant
                RETURN AFTER",
            )
            .bind(("code", code))
            .bind(("discount_type", data.discount_type))
            .bind(("discount_value", data.discount_value))
            .bind(("valid_from", data.valid_from))
            .bind(("valid_until", data.valid_until))
            .bind(("usage_limit", data.usage_limit))
            .bind(("restaurant", data.restaurant))
            .await?;
        let vouchers: Vec<Voucher> = result.take(0)?;
        vouchers
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create voucher".to_string()))
    }

    /// Atomically increment the usage counter, respecting the cap
    ///
    /// Single conditional UPDATE; returns whether a row was affected. A
    /// `false` means the cap was hit between validation and increment.
    pub async fn increment_usage(&self, id: &RecordId) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET usage_count += 1
                 WHERE usage_limit = NONE OR usage_limit = NULL OR usage_count < usage_limit
                 RETURN AFTER",
            )
            .bind(("id", id.clone()))
            .await?;
        let updated: Vec<Voucher> = result.take(0)?;
        Ok(!updated.is_empty())
    }
}
