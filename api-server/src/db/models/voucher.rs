//! Voucher persistence model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use shared::models::DiscountType;

/// Voucher entity
///
/// `usage_count` only ever goes up; the conditional increment in
/// `VoucherRepository::increment_usage` keeps it at or under `usage_limit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voucher {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Stored uppercase; lookups normalize before matching
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    /// Inclusive lower bound (ISO-8601)
    pub valid_from: String,
    /// Inclusive upper bound (ISO-8601)
    pub valid_until: String,
    #[serde(default)]
    pub usage_limit: Option<i64>,
    #[serde(default)]
    pub usage_count: i64,
    /// Restaurant scope; None = valid for any restaurant
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub restaurant: Option<RecordId>,
}

fn default_true() -> bool {
    true
}
