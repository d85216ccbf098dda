//! `PostgreSQL` item store.
//!
//! Runtime-checked queries over the `items` table. The id column is a
//! `SERIAL`, so ids are assigned by the database sequence and never reused
//! after deletion.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::PgPool;

use sahara_core::ItemId;

use super::{ItemStore, StoreError};
use crate::models::{Item, ItemDraft};

/// Item store backed by `PostgreSQL`.
#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    /// Create a new store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn insert(&self, draft: ItemDraft) -> Result<Item, StoreError> {
        let item = sqlx::query_as::<_, Item>(
            r"
            INSERT INTO items (name, price, quantity, image_url, color, category, tags, stock_available)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, price, quantity, image_url, color, category, tags, stock_available
            ",
        )
        .bind(draft.name)
        .bind(draft.price)
        .bind(draft.quantity)
        .bind(draft.image_url)
        .bind(draft.color)
        .bind(draft.category)
        .bind(draft.tags)
        .bind(draft.stock_available)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let item = sqlx::query_as::<_, Item>(
            r"
            SELECT id, name, price, quantity, image_url, color, category, tags, stock_available
            FROM items
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn find_by_ids(&self, ids: &[ItemId]) -> Result<Vec<Item>, StoreError> {
        let raw: Vec<i32> = ids.iter().map(ItemId::as_i32).collect();
        let items = sqlx::query_as::<_, Item>(
            r"
            SELECT id, name, price, quantity, image_url, color, category, tags, stock_available
            FROM items
            WHERE id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        let items = sqlx::query_as::<_, Item>(
            r"
            SELECT id, name, price, quantity, image_url, color, category, tags, stock_available
            FROM items
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn update(&self, item: &Item) -> Result<(), StoreError> {
        sqlx::query(
            r"
            UPDATE items
            SET name = $2, price = $3, quantity = $4, image_url = $5,
                color = $6, category = $7, tags = $8, stock_available = $9
            WHERE id = $1
            ",
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(item.price)
        .bind(item.quantity)
        .bind(&item.image_url)
        .bind(&item.color)
        .bind(&item.category)
        .bind(&item.tags)
        .bind(item.stock_available)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn distinct_categories(&self) -> Result<BTreeSet<String>, StoreError> {
        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT category FROM items WHERE category IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories.into_iter().collect())
    }
}
