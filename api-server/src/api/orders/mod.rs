//! Order API Module
//!
//! All operations delegate to the order orchestrator; handlers only parse
//! input and enforce the caller's role.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Checkout + own order list (customers)
        .route("/", post(handler::create).get(handler::list_own))
        // Orders of one restaurant (its owner)
        .route("/restaurant/{restaurant_id}", get(handler::list_for_restaurant))
        // Order detail (customer who placed it, or the restaurant's owner)
        .route("/{id}", get(handler::get_by_id))
        // Fulfillment (restaurant owner)
        .route("/{id}/accept", post(handler::accept))
        .route("/{id}/reject", post(handler::reject))
        .route("/{id}/status", post(handler::update_status))
}
