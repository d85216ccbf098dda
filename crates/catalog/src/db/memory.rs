//! In-memory item store.
//!
//! Backs the service test suites and is handy for poking at the API without
//! a database. Mirrors the `PostgreSQL` adapter's id discipline: ids come
//! from a monotonic counter and are never reused after deletion.

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;

use sahara_core::ItemId;

use super::{ItemStore, StoreError};
use crate::models::{Item, ItemDraft};

#[derive(Default)]
struct Inner {
    next_id: i32,
    items: Vec<Item>,
}

/// Item store backed by a `Vec` behind a mutex.
#[derive(Default)]
pub struct MemoryItemStore {
    inner: Mutex<Inner>,
}

impl MemoryItemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only happens after a panic mid-mutation; keep
        // going with whatever state is there rather than panicking again.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn insert(&self, draft: ItemDraft) -> Result<Item, StoreError> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let item = Item {
            id: ItemId::new(inner.next_id),
            name: draft.name,
            price: draft.price,
            quantity: draft.quantity,
            image_url: draft.image_url,
            color: draft.color,
            category: draft.category,
            tags: draft.tags,
            stock_available: draft.stock_available,
        };
        inner.items.push(item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        Ok(self.lock().items.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ItemId]) -> Result<Vec<Item>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .items
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.lock().items.clone())
    }

    async fn update(&self, item: &Item) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if let Some(stored) = inner.items.iter_mut().find(|i| i.id == item.id) {
            *stored = item.clone();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<bool, StoreError> {
        let mut inner = self.lock();
        let before = inner.items.len();
        inner.items.retain(|i| i.id != id);
        Ok(inner.items.len() < before)
    }

    async fn distinct_categories(&self) -> Result<BTreeSet<String>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .items
            .iter()
            .filter_map(|i| i.category.clone())
            .collect())
    }
}
