//! Voucher validation ladder and discount arithmetic
//!
//! Validation checks, in order: existence, activation flag, validity window
//! (inclusive at both bounds), usage cap, restaurant scope. The usage cap
//! check here is advisory; the enforcement point is the conditional
//! increment in `VoucherRepository::increment_usage`.

use chrono::{DateTime, Utc};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::db::models::Voucher;
use crate::db::repository::VoucherRepository;
use crate::orders::money::{to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::models::DiscountType;
use shared::{AppError, AppResult, ErrorCode};

/// Why a voucher was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoucherRejection {
    NotFound,
    Inactive,
    NotYetValid,
    Expired,
    LimitReached,
    WrongRestaurant,
}

impl VoucherRejection {
    /// Human-readable reason, surfaced by the validate endpoint
    pub fn reason(&self) -> &'static str {
        match self {
            VoucherRejection::NotFound => "voucher not found",
            VoucherRejection::Inactive => "voucher is not active",
            VoucherRejection::NotYetValid => "voucher is not yet valid",
            VoucherRejection::Expired => "voucher has expired",
            VoucherRejection::LimitReached => "voucher usage limit reached",
            VoucherRejection::WrongRestaurant => "voucher is not valid for this restaurant",
        }
    }

    /// Error code used when the refusal aborts order creation
    pub fn error_code(&self) -> ErrorCode {
        match self {
            VoucherRejection::NotFound => ErrorCode::VoucherNotFound,
            VoucherRejection::Inactive => ErrorCode::VoucherInactive,
            VoucherRejection::NotYetValid => ErrorCode::VoucherNotYetValid,
            VoucherRejection::Expired => ErrorCode::VoucherExpired,
            VoucherRejection::LimitReached => ErrorCode::VoucherLimitReached,
            VoucherRejection::WrongRestaurant => ErrorCode::VoucherWrongRestaurant,
        }
    }
}

impl From<VoucherRejection> for AppError {
    fn from(rejection: VoucherRejection) -> Self {
        AppError::with_message(rejection.error_code(), rejection.reason())
    }
}

/// Check a loaded voucher against the full rejection ladder
///
/// `restaurant` is the restaurant the voucher would be applied at; a voucher
/// without a restaurant scope is valid anywhere. Both window bounds are
/// inclusive at the boundary instant.
pub fn check_voucher(
    voucher: &Voucher,
    restaurant: Option<&RecordId>,
    now: DateTime<Utc>,
) -> Result<(), VoucherRejection> {
    if !voucher.is_active {
        return Err(VoucherRejection::Inactive);
    }

    // An unparseable window refuses the voucher rather than waving it through
    let Some(valid_from) = parse_instant(&voucher.valid_from) else {
        tracing::warn!(code = %voucher.code, "Voucher has malformed valid_from");
        return Err(VoucherRejection::NotYetValid);
    };
    let Some(valid_until) = parse_instant(&voucher.valid_until) else {
        tracing::warn!(code = %voucher.code, "Voucher has malformed valid_until");
        return Err(VoucherRejection::Expired);
    };

    if now < valid_from {
        return Err(VoucherRejection::NotYetValid);
    }
    if now > valid_until {
        return Err(VoucherRejection::Expired);
    }

    if let Some(limit) = voucher.usage_limit
        && voucher.usage_count >= limit
    {
        return Err(VoucherRejection::LimitReached);
    }

    if let Some(scope) = &voucher.restaurant
        && restaurant != Some(scope)
    {
        return Err(VoucherRejection::WrongRestaurant);
    }

    Ok(())
}

/// Discount amount for a voucher applied to `amount`, 2-decimal half-up
///
/// A fixed-amount discount is capped at the order amount, so the discount
/// alone can never push the price negative.
pub fn calculate_discount(voucher: &Voucher, amount: f64) -> f64 {
    let amount = to_decimal(amount);
    let value = to_decimal(voucher.discount_value);
    let discount = match voucher.discount_type {
        DiscountType::Percentage => amount * value / Decimal::ONE_HUNDRED,
        DiscountType::FixedAmount => value.min(amount),
    };
    to_f64(discount)
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Voucher engine: lookup plus the validation ladder
#[derive(Clone)]
pub struct VoucherEngine {
    repo: VoucherRepository,
}

impl VoucherEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: VoucherRepository::new(db),
        }
    }

    /// Look up a code and run the full validation ladder
    pub async fn validate(
        &self,
        code: &str,
        restaurant: Option<&RecordId>,
        now: DateTime<Utc>,
    ) -> AppResult<Result<Voucher, VoucherRejection>> {
        let Some(voucher) = self.repo.find_by_code(code).await? else {
            return Ok(Err(VoucherRejection::NotFound));
        };
        match check_voucher(&voucher, restaurant, now) {
            Ok(()) => Ok(Ok(voucher)),
            Err(rejection) => Ok(Err(rejection)),
        }
    }

    /// Count a successful use, capped by the store-level conditional update
    ///
    /// Returns whether the counter moved. Callers invoke this once, after
    /// the order row is durably created.
    pub async fn increment_usage(&self, voucher: &RecordId) -> AppResult<bool> {
        Ok(self.repo.increment_usage(voucher).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn voucher(discount_type: DiscountType, value: f64) -> Voucher {
        Voucher {
            id: Some(RecordId::from_table_key("voucher", "v1")),
            code: "TEST10".to_string(),
            discount_type,
            discount_value: value,
            is_active: true,
            valid_from: "2025-01-01T00:00:00+00:00".to_string(),
            valid_until: "2025-12-31T23:59:59+00:00".to_string(),
            usage_limit: None,
            usage_count: 0,
            restaurant: None,
        }
    }

    fn mid_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_voucher_passes() {
        let v = voucher(DiscountType::Percentage, 10.0);
        assert_eq!(check_voucher(&v, None, mid_2025()), Ok(()));
    }

    #[test]
    fn test_inactive_voucher_rejected() {
        let mut v = voucher(DiscountType::Percentage, 10.0);
        v.is_active = false;
        assert_eq!(
            check_voucher(&v, None, mid_2025()),
            Err(VoucherRejection::Inactive)
        );
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let v = voucher(DiscountType::Percentage, 10.0);

        let at_start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(check_voucher(&v, None, at_start), Ok(()));

        let at_end = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(check_voucher(&v, None, at_end), Ok(()));

        let before = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            check_voucher(&v, None, before),
            Err(VoucherRejection::NotYetValid)
        );

        let after = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(check_voucher(&v, None, after), Err(VoucherRejection::Expired));
    }

    #[test]
    fn test_usage_limit_reached_regardless_of_window() {
        let mut v = voucher(DiscountType::Percentage, 10.0);
        v.usage_limit = Some(5);
        v.usage_count = 5;
        assert_eq!(
            check_voucher(&v, None, mid_2025()),
            Err(VoucherRejection::LimitReached)
        );

        v.usage_count = 4;
        assert_eq!(check_voucher(&v, None, mid_2025()), Ok(()));
    }

    #[test]
    fn test_restaurant_scoping() {
        let mut v = voucher(DiscountType::Percentage, 10.0);
        let mine = RecordId::from_table_key("restaurant", "r1");
        let other = RecordId::from_table_key("restaurant", "r2");

        // Global voucher works anywhere
        assert_eq!(check_voucher(&v, Some(&mine), mid_2025()), Ok(()));

        v.restaurant = Some(mine.clone());
        assert_eq!(check_voucher(&v, Some(&mine), mid_2025()), Ok(()));
        assert_eq!(
            check_voucher(&v, Some(&other), mid_2025()),
            Err(VoucherRejection::WrongRestaurant)
        );
        assert_eq!(
            check_voucher(&v, None, mid_2025()),
            Err(VoucherRejection::WrongRestaurant)
        );
    }

    #[test]
    fn test_percentage_discount() {
        let v = voucher(DiscountType::Percentage, 10.0);
        assert_eq!(calculate_discount(&v, 25.50), 2.55);
        assert_eq!(calculate_discount(&v, 100.0), 10.0);
    }

    #[test]
    fn test_percentage_discount_rounds_half_up() {
        let v = voucher(DiscountType::Percentage, 15.0);
        // 15% of 8.30 = 1.245 -> 1.25
        assert_eq!(calculate_discount(&v, 8.30), 1.25);
    }

    #[test]
    fn test_fixed_discount_capped_at_amount() {
        let v = voucher(DiscountType::FixedAmount, 5.0);
        assert_eq!(calculate_discount(&v, 3.00), 3.00);
        assert_eq!(calculate_discount(&v, 20.00), 5.00);
    }

    #[test]
    fn test_malformed_window_refused() {
        let mut v = voucher(DiscountType::Percentage, 10.0);
        v.valid_from = "not-a-date".to_string();
        assert_eq!(
            check_voucher(&v, None, mid_2025()),
            Err(VoucherRejection::NotYetValid)
        );
    }
}
