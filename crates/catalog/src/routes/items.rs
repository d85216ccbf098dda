//! Item route handlers.
//!
//! Handlers stay thin: parse the request at the boundary, call one service
//! operation, serialize the result. Status-code mapping lives in
//! [`crate::error::AppError`].

use std::collections::BTreeSet;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use sahara_core::ItemId;

use crate::error::Result;
use crate::models::{Item, ItemDraft, ItemPatch};
use crate::services::{ItemFilterRequest, ItemQuery};
use crate::state::AppState;

/// Create a new item. The caller never picks the id.
#[instrument(skip(state, draft))]
pub async fn add(
    State(state): State<AppState>,
    Json(draft): Json<ItemDraft>,
) -> Result<impl IntoResponse> {
    let item = state.catalog().add_item(draft).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// List every item, unfiltered, in store order.
#[instrument(skip(state))]
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<Item>>> {
    let items = state.catalog().list_items(&ItemQuery::default()).await?;
    Ok(Json(items))
}

/// Filtered and sorted listing.
///
/// A bad sort descriptor rejects the whole request with 400; no partial
/// result is returned.
#[instrument(skip(state, request))]
pub async fn filter(
    State(state): State<AppState>,
    Json(request): Json<ItemFilterRequest>,
) -> Result<Json<Vec<Item>>> {
    let query = ItemQuery::try_from(request)?;
    let items = state.catalog().list_items(&query).await?;
    Ok(Json(items))
}

/// Fetch one item by id.
#[instrument(skip(state))]
pub async fn get(State(state): State<AppState>, Path(id): Path<ItemId>) -> Result<Json<Item>> {
    let item = state.catalog().get_item(id).await?;
    Ok(Json(item))
}

/// Fetch a batch of items; ids that miss are omitted from the response.
#[instrument(skip(state, ids))]
pub async fn get_by_ids(
    State(state): State<AppState>,
    Json(ids): Json<Vec<ItemId>>,
) -> Result<Json<Vec<Item>>> {
    let items = state.catalog().get_items_by_ids(&ids).await?;
    Ok(Json(items))
}

/// Distinct categories across the catalog.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<BTreeSet<String>>> {
    let categories = state.catalog().categories().await?;
    Ok(Json(categories))
}

/// Partial update; only fields carrying a value are overwritten.
#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(patch): Json<ItemPatch>,
) -> Result<Json<Item>> {
    let item = state.catalog().update_item(id, patch).await?;
    Ok(Json(item))
}

/// Add tags to an item.
#[instrument(skip(state, tags))]
pub async fn add_tags(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(tags): Json<Vec<String>>,
) -> Result<Json<Item>> {
    let item = state.catalog().add_tags(id, tags).await?;
    Ok(Json(item))
}

/// Remove tags from an item.
#[instrument(skip(state, tags))]
pub async fn remove_tags(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(tags): Json<Vec<String>>,
) -> Result<Json<Item>> {
    let item = state.catalog().remove_tags(id, tags).await?;
    Ok(Json(item))
}

/// Delete an item by id.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<impl IntoResponse> {
    state.catalog().remove_item(id).await?;
    Ok(format!("Item with id {id} has been deleted."))
}
