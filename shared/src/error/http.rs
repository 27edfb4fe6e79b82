//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 422 Unprocessable Entity (malformed/out-of-range input)
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::VoucherNotFound
            | Self::RestaurantNotFound
            | Self::DishNotFound
            | Self::CustomerNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (legal input, illegal state)
            Self::AlreadyExists
            | Self::OrderNotPending
            | Self::OrderAlreadyFinal
            | Self::InvalidStatusTransition
            | Self::RestaurantClosed
            | Self::VoucherInactive
            | Self::VoucherNotYetValid
            | Self::VoucherExpired
            | Self::VoucherLimitReached
            | Self::VoucherWrongRestaurant
            | Self::VoucherZeroesOrder
            | Self::VoucherCodeExists
            | Self::DishUnavailable
            | Self::EmailAlreadyRegistered => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::RoleRequired => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
