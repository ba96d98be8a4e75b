//! Entity CRUD routes. Collection paths are served with and without a trailing slash.

use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/entities", get(list).post(create).put(update))
        .route("/entities/", get(list).post(create).put(update))
        .route("/entities/:id", get(read).delete(delete_handler))
        .with_state(state)
}
