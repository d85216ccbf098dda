//! Cart domain types.
//!
//! A cart is a denormalized snapshot: item data is copied in at save time
//! and never re-validated against the catalog afterwards. The `id` on a
//! cart line references a catalog item by convention only.

use serde::{Deserialize, Serialize};

/// One line of a cart: the item snapshot the shopper saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemData {
    /// Catalog item id, as a string. Not enforced against the catalog.
    pub id: String,
    /// Item name at save time.
    pub name: Option<String>,
    /// Unit price at save time.
    #[serde(default)]
    pub price: f64,
    /// Units the shopper put in the cart.
    #[serde(default)]
    pub quantity: i32,
}

/// A saved cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Generated cart id (UUID v4), handed to the shopper as an order id.
    pub cart_id: String,
    /// Cart lines in the order the shopper saved them.
    pub items: Vec<CartItemData>,
    /// Free-text status, e.g. "in progress" or "completed". No enumeration
    /// is enforced.
    pub status: String,
}

/// Partial-update payload for a cart: `None` fields are left untouched,
/// `Some` fields are replaced wholesale (an empty item list clears the
/// cart's items).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPatch {
    pub items: Option<Vec<CartItemData>>,
    pub status: Option<String>,
}
