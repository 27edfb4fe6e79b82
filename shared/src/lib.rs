//! Shared types for the Tavola marketplace
//!
//! Common types used across crates: error codes, the unified API response
//! envelope, and the domain/wire models for orders, vouchers and catalog
//! entities.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::order::OrderStatus;
