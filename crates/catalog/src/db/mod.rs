//! Item persistence for the catalog service.
//!
//! The [`ItemStore`] trait is the seam between the business logic and
//! storage. Two adapters implement it:
//!
//! - [`PgItemStore`](postgres::PgItemStore) - `PostgreSQL`, the production
//!   store (`items` table, see `crates/catalog/migrations/`)
//! - [`MemoryItemStore`](memory::MemoryItemStore) - in-memory, used by the
//!   test suites and available for local experiments
//!
//! # Migrations
//!
//! Migrations are stored in `crates/catalog/migrations/` and run via:
//! ```bash
//! cargo run -p sahara-cli -- migrate catalog
//! ```

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use sahara_core::ItemId;

use crate::models::{Item, ItemDraft};

pub mod memory;
pub mod postgres;

pub use memory::MemoryItemStore;
pub use postgres::PgItemStore;

/// Errors returned by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Abstract item storage.
///
/// No pagination or streaming: `find_all` returns the entire table into
/// memory, which is what the filter engine consumes. Writes are whole-record
/// and last-writer-wins; callers needing "fail if missing" semantics check
/// existence first.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Insert a new item, assigning its id. Ids are never reused.
    async fn insert(&self, draft: ItemDraft) -> Result<Item, StoreError>;

    /// Find an item by id.
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// Find items by ids. Missing ids are silently omitted.
    async fn find_by_ids(&self, ids: &[ItemId]) -> Result<Vec<Item>, StoreError>;

    /// Return every item.
    async fn find_all(&self) -> Result<Vec<Item>, StoreError>;

    /// Overwrite the stored record with `item` (matched by id).
    async fn update(&self, item: &Item) -> Result<(), StoreError>;

    /// Delete by id. Returns `false` if no such item existed.
    async fn delete_by_id(&self, id: ItemId) -> Result<bool, StoreError>;

    /// Distinct non-null categories across all items.
    async fn distinct_categories(&self) -> Result<BTreeSet<String>, StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
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
