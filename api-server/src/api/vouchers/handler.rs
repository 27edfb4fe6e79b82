//! Voucher API Handlers

use axum::{Json, extract::State};
use chrono::DateTime;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Voucher;
use crate::db::repository::voucher::NewVoucher;
use crate::db::repository::{RepoError, RestaurantRepository, VoucherRepository};
use crate::orders::money::MAX_PRICE;
use crate::utils::validation::validate_required_text;
use shared::models::DiscountType;
use shared::models::voucher::{CreateVoucherRequest, ValidateVoucherRequest, ValidateVoucherResponse};
use shared::{AppError, AppResult, ErrorCode};

/// Maximum voucher code length
const MAX_CODE_LEN: usize = 64;

/// Validate a voucher code against an optional restaurant and order amount
///
/// Always answers 200 with a `valid` flag; only malformed input errors.
pub async fn validate(
    State(state): State<ServerState>,
    Json(payload): Json<ValidateVoucherRequest>,
) -> AppResult<Json<ValidateVoucherResponse>> {
    validate_required_text(&payload.code, "code", MAX_CODE_LEN)?;
    if let Some(amount) = payload.order_amount
        && (!amount.is_finite() || amount < 0.0)
    {
        return Err(AppError::validation(format!(
            "order_amount must be a non-negative number, got {amount}"
        )));
    }

    let service = state.order_service();
    let response = service.validate_voucher(payload).await?;
    Ok(Json(response))
}

/// Create a voucher (restaurant owners)
///
/// A restaurant-scoped voucher must reference one of the caller's own
/// restaurants; omitting the scope creates a global voucher.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateVoucherRequest>,
) -> AppResult<Json<Voucher>> {
    if !user.is_restaurant_owner() {
        return Err(AppError::with_message(
            ErrorCode::RoleRequired,
            "Restaurant owner role required",
        ));
    }

    validate_required_text(&payload.code, "code", MAX_CODE_LEN)?;
    if !payload.discount_value.is_finite() || payload.discount_value <= 0.0 {
        return Err(AppError::validation("discount_value must be positive"));
    }
    if payload.discount_type == DiscountType::Percentage && payload.discount_value > 100.0 {
        return Err(AppError::validation(
            "percentage discount cannot exceed 100",
        ));
    }
    if payload.discount_type == DiscountType::FixedAmount && payload.discount_value > MAX_PRICE {
        return Err(AppError::validation(format!(
            "fixed discount cannot exceed {MAX_PRICE}"
        )));
    }
    let valid_from = DateTime::parse_from_rfc3339(&payload.valid_from)
        .map_err(|_| AppError::validation(format!("Invalid valid_from: {}", payload.valid_from)))?;
    let valid_until = DateTime::parse_from_rfc3339(&payload.valid_until).map_err(|_| {
        AppError::validation(format!("Invalid valid_until: {}", payload.valid_until))
    })?;
    if valid_until < valid_from {
        return Err(AppError::validation("valid_until is before valid_from"));
    }
    if let Some(limit) = payload.usage_limit
        && limit <= 0
    {
        return Err(AppError::validation("usage_limit must be positive"));
    }

    // A scoped voucher must point at one of the caller's restaurants
    let restaurant = match &payload.restaurant_id {
        Some(id) => {
            let restaurants = RestaurantRepository::new(state.db.clone());
            let restaurant = restaurants.find_by_id(id).await?.ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::RestaurantNotFound,
                    format!("Restaurant {} not found", id),
                )
            })?;
            if restaurant.owner != user.record_id()? {
                return Err(AppError::permission_denied(
                    "Not the owner of this restaurant",
                ));
            }
            restaurant.id
        }
        None => None,
    };

    let repo = VoucherRepository::new(state.db.clone());
    let voucher = repo
        .create(NewVoucher {
            code: payload.code,
            discount_type: payload.discount_type,
            discount_value: payload.discount_value,
            valid_from: payload.valid_from,
            valid_until: payload.valid_until,
            usage_limit: payload.usage_limit,
            restaurant,
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::VoucherCodeExists, msg),
            other => other.into(),
        })?;

    tracing::info!(code = %voucher.code, "Voucher created");
    Ok(Json(voucher))
}
