//! Store-backed cart operations.
//!
//! Carts are written whole: create inserts one record, update reads the
//! record, merges the provided fields and writes it back. Two racing
//! updates resolve to whichever write lands last.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::db::{CartStore, StoreError};
use crate::models::{Cart, CartItemData};

/// Status a freshly created cart starts in.
const INITIAL_STATUS: &str = "in progress";

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// An id-keyed lookup missed.
    #[error("no cart found with id {0}")]
    NotFound(String),

    /// Storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Cart operations over a [`CartStore`].
#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn CartStore>,
}

impl CartService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self { store }
    }

    /// Save a new cart from the shopper's item snapshots and return its id.
    ///
    /// An empty item list is a valid cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Store` if the insert fails.
    pub async fn create_cart(&self, items: Vec<CartItemData>) -> Result<String, CartError> {
        let cart = Cart {
            cart_id: Uuid::new_v4().to_string(),
            items,
            status: INITIAL_STATUS.to_owned(),
        };
        self.store.insert(&cart).await?;
        Ok(cart.cart_id)
    }

    /// Fetch the item list of a cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` if the cart does not exist.
    pub async fn get_cart(&self, cart_id: &str) -> Result<Vec<CartItemData>, CartError> {
        let cart = self.fetch(cart_id).await?;
        Ok(cart.items)
    }

    /// Replace the provided parts of a cart and return the updated cart.
    ///
    /// `None` leaves a field untouched; `Some` replaces it wholesale,
    /// including `Some(vec![])` clearing the items.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` (without writing) if the cart does not
    /// exist.
    pub async fn update_cart(
        &self,
        cart_id: &str,
        items: Option<Vec<CartItemData>>,
        status: Option<String>,
    ) -> Result<Cart, CartError> {
        let mut cart = self.fetch(cart_id).await?;
        if let Some(items) = items {
            cart.items = items;
        }
        if let Some(status) = status {
            cart.status = status;
        }
        self.store.update(&cart).await?;
        Ok(cart)
    }

    async fn fetch(&self, cart_id: &str) -> Result<Cart, CartError> {
        self.store
            .find_by_cart_id(cart_id)
            .await?
            .ok_or_else(|| CartError::NotFound(cart_id.to_owned()))
    }
}
