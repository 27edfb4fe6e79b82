//! Unified error codes for the Tavola marketplace
//!
//! Error codes are shared between the API server and its clients and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Order errors
//! - 4xxx: Voucher errors
//! - 5xxx: Catalog errors (restaurants, dishes, customers)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Email is already registered
    EmailAlreadyRegistered = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,

    // ==================== 3xxx: Order ====================
    /// Order not found
    OrderNotFound = 3001,
    /// Order is not in pending status
    OrderNotPending = 3002,
    /// Order is already in a final status
    OrderAlreadyFinal = 3003,
    /// Requested status transition is not allowed
    InvalidStatusTransition = 3004,
    /// Restaurant is currently closed
    RestaurantClosed = 3005,
    /// Order has no items
    OrderEmpty = 3006,

    // ==================== 4xxx: Voucher ====================
    /// Voucher code not found
    VoucherNotFound = 4001,
    /// Voucher is deactivated
    VoucherInactive = 4002,
    /// Voucher is not yet valid
    VoucherNotYetValid = 4003,
    /// Voucher has expired
    VoucherExpired = 4004,
    /// Voucher usage limit reached
    VoucherLimitReached = 4005,
    /// Voucher belongs to a different restaurant
    VoucherWrongRestaurant = 4006,
    /// Voucher would reduce the order total to zero
    VoucherZeroesOrder = 4007,
    /// Voucher code already exists
    VoucherCodeExists = 4008,

    // ==================== 5xxx: Catalog ====================
    /// Restaurant not found
    RestaurantNotFound = 5001,
    /// Dish not found
    DishNotFound = 5002,
    /// Dish is not available
    DishUnavailable = 5003,
    /// Customer profile not found
    CustomerNotFound = 5004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderNotPending => "Order is not in pending status",
            ErrorCode::OrderAlreadyFinal => "Order is already in a final status",
            ErrorCode::InvalidStatusTransition => "Invalid status transition",
            ErrorCode::RestaurantClosed => "Restaurant is currently closed",
            ErrorCode::OrderEmpty => "Order must contain at least one item",

            // Voucher
            ErrorCode::VoucherNotFound => "Voucher not found",
            ErrorCode::VoucherInactive => "Voucher is not active",
            ErrorCode::VoucherNotYetValid => "Voucher is not yet valid",
            ErrorCode::VoucherExpired => "Voucher has expired",
            ErrorCode::VoucherLimitReached => "Voucher usage limit reached",
            ErrorCode::VoucherWrongRestaurant => "Voucher is not valid for this restaurant",
            ErrorCode::VoucherZeroesOrder => "Voucher cannot reduce the order total to zero",
            ErrorCode::VoucherCodeExists => "Voucher code already exists",

            // Catalog
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::DishNotFound => "Dish not found",
            ErrorCode::DishUnavailable => "Dish is not available",
            ErrorCode::CustomerNotFound => "Customer profile not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::EmailAlreadyRegistered),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),

            // Order
            3001 => Ok(ErrorCode::OrderNotFound),
            3002 => Ok(ErrorCode::OrderNotPending),
            3003 => Ok(ErrorCode::OrderAlreadyFinal),
            3004 => Ok(ErrorCode::InvalidStatusTransition),
            3005 => Ok(ErrorCode::RestaurantClosed),
            3006 => Ok(ErrorCode::OrderEmpty),

            // Voucher
            4001 => Ok(ErrorCode::VoucherNotFound),
            4002 => Ok(ErrorCode::VoucherInactive),
            4003 => Ok(ErrorCode::VoucherNotYetValid),
            4004 => Ok(ErrorCode::VoucherExpired),
            4005 => Ok(ErrorCode::VoucherLimitReached),
            4006 => Ok(ErrorCode::VoucherWrongRestaurant),
            4007 => Ok(ErrorCode::VoucherZeroesOrder),
            4008 => Ok(ErrorCode::VoucherCodeExists),

            // Catalog
            5001 => Ok(ErrorCode::RestaurantNotFound),
            5002 => Ok(ErrorCode::DishNotFound),
            5003 => Ok(ErrorCode::DishUnavailable),
            5004 => Ok(ErrorCode::CustomerNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 3001);
        assert_eq!(ErrorCode::InvalidStatusTransition.code(), 3004);
        assert_eq!(ErrorCode::VoucherLimitReached.code(), 4005);
        assert_eq!(ErrorCode::RestaurantNotFound.code(), 5001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::OrderNotFound.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::NotAuthenticated));
        assert_eq!(ErrorCode::try_from(3001), Ok(ErrorCode::OrderNotFound));
        assert_eq!(ErrorCode::try_from(4004), Ok(ErrorCode::VoucherExpired));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::OrderNotFound,
            ErrorCode::VoucherExpired,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::OrderNotFound), "3001");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(ErrorCode::OrderNotFound.message(), "Order not found");
        assert_eq!(
            ErrorCode::VoucherLimitReached.message(),
            "Voucher usage limit reached"
        );
    }
}
