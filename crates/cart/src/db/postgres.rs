//! `PostgreSQL` cart store.
//!
//! Carts live in a single `carts` table; the item list is a JSONB column,
//! since lines are value objects that are only ever read and written as a
//! whole cart.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use super::{CartStore, StoreError};
use crate::models::{Cart, CartItemData};

/// Cart store backed by `PostgreSQL`.
#[derive(Clone)]
pub struct PgCartStore {
    pool: PgPool,
}

impl PgCartStore {
    /// Create a new store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape for the `carts` table.
#[derive(sqlx::FromRow)]
struct CartRow {
    cart_id: String,
    items: Json<Vec<CartItemData>>,
    status: String,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Self {
            cart_id: row.cart_id,
            items: row.items.0,
            status: row.status,
        }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn insert(&self, cart: &Cart) -> Result<(), StoreError> {
        sqlx::query(
            r"
            INSERT INTO carts (cart_id, items, status)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(&cart.cart_id)
        .bind(Json(&cart.items))
        .bind(&cart.status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_cart_id(&self, cart_id: &str) -> Result<Option<Cart>, StoreError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            SELECT cart_id, items, status
            FROM carts
            WHERE cart_id = $1
            ",
        )
        .bind(cart_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Cart::from))
    }

    async fn update(&self, cart: &Cart) -> Result<(), StoreError> {
        sqlx::query(
            r"
            UPDATE carts
            SET items = $2, status = $3
            WHERE cart_id = $1
            ",
        )
        .bind(&cart.cart_id)
        .bind(Json(&cart.items))
        .bind(&cart.status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
