//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - registration and login
//! - [`restaurants`] - restaurant browsing and menu management
//! - [`vouchers`] - voucher creation and validation
//! - [`orders`] - order lifecycle endpoints

pub mod auth;
pub mod health;
pub mod orders;
pub mod restaurants;
pub mod vouchers;

use axum::Router;

use crate::core::ServerState;

/// Assemble the full API router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(restaurants::router())
        .merge(vouchers::router())
        .merge(orders::router())
}
