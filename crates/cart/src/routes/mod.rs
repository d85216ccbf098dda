//! HTTP route handlers for the cart service.
//!
//! # Route Structure
//!
//! ```text
//! GET   /health                  - Liveness check
//! GET   /health/ready            - Readiness check (pings the database)
//!
//! # Carts
//! POST  /cart/add                - Save a cart (201, returns the cart id)
//! GET   /cart/{cart_id}          - Fetch a cart's item list
//! PATCH /cart/update/{cart_id}   - Update items and/or status
//! ```
//!
//! `POST /cart/add` and `GET /cart/{cart_id}` are the calls the shop
//! front-end makes.

pub mod carts;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create all routes for the cart service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart/add", post(carts::add))
        .route("/cart/{cart_id}", get(carts::get))
        .route("/cart/update/{cart_id}", patch(carts::update))
}
