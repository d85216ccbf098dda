//! HTTP route handlers for the catalog service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings the database)
//!
//! # Items
//! POST   /item/add                 - Create an item (201)
//! GET    /items/getAll             - List every item
//! POST   /items/filter             - Filtered/sorted listing
//! GET    /items/get/{id}           - Fetch one item
//! POST   /items/getByIds           - Fetch a batch of items
//! GET    /items/categories         - Distinct categories
//! PATCH  /item/update/{id}         - Partial update
//! PATCH  /item/update/{id}/addTag  - Add tags
//! PATCH  /item/update/{id}/removeTag - Remove tags
//! DELETE /item/remove/{id}         - Delete an item
//! ```
//!
//! Path spellings are the ones the shop and admin front-ends already call.

pub mod items;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Create all routes for the catalog service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/item/add", post(items::add))
        .route("/items/getAll", get(items::get_all))
        .route("/items/filter", post(items::filter))
        .route("/items/get/{id}", get(items::get))
        .route("/items/getByIds", post(items::get_by_ids))
        .route("/items/categories", get(items::categories))
        .route("/item/update/{id}", patch(items::update))
        .route("/item/update/{id}/addTag", patch(items::add_tags))
        .route("/item/update/{id}/removeTag", patch(items::remove_tags))
        .route("/item/remove/{id}", delete(items::remove))
}
