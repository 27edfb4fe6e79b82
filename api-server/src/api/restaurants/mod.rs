//! Restaurant API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurants", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/mine", get(handler::list_own))
        .route("/{id}", get(handler::get_by_id))
        .route(
            "/{id}/dishes",
            get(handler::list_dishes).post(handler::create_dish),
        )
}
