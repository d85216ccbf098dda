//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::CartConfig;
use crate::db::PgCartStore;
use crate::services::CartService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CartConfig,
    pool: PgPool,
    cart: CartService,
}

impl AppState {
    /// Create a new application state over a `PostgreSQL` pool.
    #[must_use]
    pub fn new(config: CartConfig, pool: PgPool) -> Self {
        let cart = CartService::new(Arc::new(PgCartStore::new(pool.clone())));

        Self {
            inner: Arc::new(AppStateInner { config, pool, cart }),
        }
    }

    /// Get a reference to the cart configuration.
    #[must_use]
    pub fn config(&self) -> &CartConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }
}
