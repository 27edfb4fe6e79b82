//! Voucher wire types

use serde::{Deserialize, Serialize};

/// Discount computation mode for a voucher
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `amount * value / 100`
    Percentage,
    /// `min(value, amount)`
    FixedAmount,
}

/// Create voucher payload (restaurant owners)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVoucherRequest {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    /// ISO-8601 instant, inclusive lower bound
    pub valid_from: String,
    /// ISO-8601 instant, inclusive upper bound
    pub valid_until: String,
    pub usage_limit: Option<i64>,
    /// Restaurant scope (String ID); absent = valid for any restaurant
    pub restaurant_id: Option<String>,
}

/// Validate voucher payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateVoucherRequest {
    pub code: String,
    pub restaurant_id: Option<String>,
    pub order_amount: Option<f64>,
}

/// Validate voucher result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateVoucherResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidateVoucherResponse {
    /// A valid voucher with no amount supplied (no discount preview)
    pub fn valid() -> Self {
        Self {
            valid: true,
            discount_amount: None,
            final_price: None,
            message: None,
        }
    }

    /// A valid voucher with the discount applied to the supplied amount
    pub fn valid_with_discount(discount_amount: f64, final_price: f64) -> Self {
        Self {
            valid: true,
            discount_amount: Some(discount_amount),
            final_price: Some(final_price),
            message: None,
        }
    }

    /// An invalid voucher with a reason
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            discount_amount: None,
            final_price: None,
            message: Some(message.into()),
        }
    }
}
