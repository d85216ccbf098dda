//! Cart route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::Result;
use crate::models::{Cart, CartItemData, CartPatch};
use crate::state::AppState;

/// Save a new cart. Returns the generated cart id for the shopper to keep.
#[instrument(skip(state, items))]
pub async fn add(
    State(state): State<AppState>,
    Json(items): Json<Vec<CartItemData>>,
) -> Result<impl IntoResponse> {
    let cart_id = state.cart().create_cart(items).await?;
    Ok((StatusCode::CREATED, Json(cart_id)))
}

/// Fetch a cart's item list by id.
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> Result<Json<Vec<CartItemData>>> {
    let items = state.cart().get_cart(&cart_id).await?;
    Ok(Json(items))
}

/// Update a cart's items and/or status; omitted fields are untouched.
#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    Json(patch): Json<CartPatch>,
) -> Result<Json<Cart>> {
    let cart = state
        .cart()
        .update_cart(&cart_id, patch.items, patch.status)
        .await?;
    Ok(Json(cart))
}
