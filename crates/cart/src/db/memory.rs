//! In-memory cart store, used by the test suites.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CartStore, StoreError};
use crate::models::Cart;

/// Cart store backed by a `Vec` behind a mutex.
#[derive(Default)]
pub struct MemoryCartStore {
    carts: Mutex<Vec<Cart>>,
}

impl MemoryCartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored carts. Test-suite convenience.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if no carts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Cart>> {
        match self.carts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn insert(&self, cart: &Cart) -> Result<(), StoreError> {
        self.lock().push(cart.clone());
        Ok(())
    }

    async fn find_by_cart_id(&self, cart_id: &str) -> Result<Option<Cart>, StoreError> {
        Ok(self.lock().iter().find(|c| c.cart_id == cart_id).cloned())
    }

    async fn update(&self, cart: &Cart) -> Result<(), StoreError> {
        let mut carts = self.lock();
        if let Some(stored) = carts.iter_mut().find(|c| c.cart_id == cart.cart_id) {
            *stored = cart.clone();
        }
        Ok(())
    }
}
