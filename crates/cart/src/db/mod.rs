//! Cart persistence.
//!
//! The [`CartStore`] trait is the seam between the cart operations and
//! storage. Adapters:
//!
//! - [`PgCartStore`](postgres::PgCartStore) - `PostgreSQL` (`carts` table,
//!   items stored as a JSONB column)
//! - [`MemoryCartStore`](memory::MemoryCartStore) - in-memory, used by the
//!   test suites
//!
//! # Migrations
//!
//! Migrations are stored in `crates/cart/migrations/` and run via:
//! ```bash
//! cargo run -p sahara-cli -- migrate cart
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::models::Cart;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCartStore;
pub use postgres::PgCartStore;

/// Errors returned by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Abstract cart storage.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Insert a new cart. The caller generates the id.
    async fn insert(&self, cart: &Cart) -> Result<(), StoreError>;

    /// Find a cart by its id.
    async fn find_by_cart_id(&self, cart_id: &str) -> Result<Option<Cart>, StoreError>;

    /// Overwrite the stored cart (matched by id). Last writer wins.
    async fn update(&self, cart: &Cart) -> Result<(), StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
