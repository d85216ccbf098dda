//! Store-backed item operations.
//!
//! Every operation reads a snapshot from the store, applies a pure
//! transformation, and (for mutations) writes back exactly one record.
//! There is no concurrency control: two racing updates to the same item
//! resolve to whichever full-record write lands last.

use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;

use sahara_core::ItemId;

use crate::db::{ItemStore, StoreError};
use crate::models::{Item, ItemDraft, ItemPatch};

use super::query::{ItemQuery, filter_and_sort};

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An id-keyed lookup missed.
    #[error("no item found with id {0}")]
    NotFound(ItemId),

    /// Storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Catalog operations over an [`ItemStore`].
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ItemStore>,
}

impl CatalogService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Create a new item. The store assigns the id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the insert fails.
    pub async fn add_item(&self, draft: ItemDraft) -> Result<Item, CatalogError> {
        Ok(self.store.insert(draft).await?)
    }

    /// List items matching `query`, sorted by its sort keys.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the read fails.
    pub async fn list_items(&self, query: &ItemQuery) -> Result<Vec<Item>, CatalogError> {
        let items = self.store.find_all().await?;
        Ok(filter_and_sort(items, query))
    }

    /// Fetch one item by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id does not exist.
    pub async fn get_item(&self, id: ItemId) -> Result<Item, CatalogError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Fetch items by ids; missing ids are omitted from the result.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the read fails.
    pub async fn get_items_by_ids(&self, ids: &[ItemId]) -> Result<Vec<Item>, CatalogError> {
        Ok(self.store.find_by_ids(ids).await?)
    }

    /// Distinct categories across the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the read fails.
    pub async fn categories(&self) -> Result<BTreeSet<String>, CatalogError> {
        Ok(self.store.distinct_categories().await?)
    }

    /// Merge a partial update into the stored item and persist it.
    ///
    /// Only fields carrying a value are overwritten; there is no field-level
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id does not exist.
    pub async fn update_item(&self, id: ItemId, patch: ItemPatch) -> Result<Item, CatalogError> {
        let mut item = self.get_item(id).await?;
        apply_patch(&mut item, patch);
        self.store.update(&item).await?;
        Ok(item)
    }

    /// Add tags to an item, skipping tags it already has.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id does not exist.
    pub async fn add_tags(&self, id: ItemId, tags_to_add: Vec<String>) -> Result<Item, CatalogError> {
        let mut item = self.get_item(id).await?;
        let mut tags = item.tags.take().unwrap_or_default();
        merge_tags(&mut tags, tags_to_add);
        item.tags = Some(tags);
        self.store.update(&item).await?;
        Ok(item)
    }

    /// Remove every occurrence of the given tags from an item.
    ///
    /// Tags the item does not have are silently ignored; an item with no
    /// tag list is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id does not exist.
    pub async fn remove_tags(
        &self,
        id: ItemId,
        tags_to_remove: Vec<String>,
    ) -> Result<Item, CatalogError> {
        let mut item = self.get_item(id).await?;
        if let Some(tags) = &mut item.tags {
            tags.retain(|t| !tags_to_remove.contains(t));
        }
        self.store.update(&item).await?;
        Ok(item)
    }

    /// Delete an item by id.
    ///
    /// The existence check runs first, so a miss never touches the store.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id does not exist.
    pub async fn remove_item(&self, id: ItemId) -> Result<(), CatalogError> {
        self.get_item(id).await?;
        self.store.delete_by_id(id).await?;
        Ok(())
    }
}

/// Overwrite each field of `item` that the patch carries a value for.
fn apply_patch(item: &mut Item, patch: ItemPatch) {
    patch.name.apply(&mut item.name);
    patch.price.apply(&mut item.price);
    patch.quantity.apply(&mut item.quantity);
    patch.image_url.apply(&mut item.image_url);
    patch.color.apply(&mut item.color);
    patch.category.apply(&mut item.category);
    patch.stock_available.apply(&mut item.stock_available);
}

/// Append each new tag unless already present. Case-sensitive, insertion
/// order preserved, first occurrence kept.
fn merge_tags(tags: &mut Vec<String>, tags_to_add: Vec<String>) {
    for tag in tags_to_add {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryItemStore;
    use crate::models::Patch;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryItemStore::new()))
    }

    async fn seeded(service: &CatalogService, draft: ItemDraft) -> Item {
        service.add_item(draft).await.unwrap()
    }

    fn tagged(tags: &[&str]) -> ItemDraft {
        ItemDraft {
            tags: Some(tags.iter().map(|&t| t.to_owned()).collect()),
            ..ItemDraft::default()
        }
    }

    #[tokio::test]
    async fn test_add_item_assigns_id_and_persists() {
        let service = service();
        let item = seeded(
            &service,
            ItemDraft {
                name: Some("Test Item".to_owned()),
                price: Some(10.0),
                quantity: Some(5),
                ..ItemDraft::default()
            },
        )
        .await;

        assert_eq!(item.id.as_i32(), 1);
        assert_eq!(item.name.as_deref(), Some("Test Item"));
        let fetched = service.get_item(item.id).await.unwrap();
        assert_eq!(fetched, item);
    }

    #[tokio::test]
    async fn test_get_item_missing_is_not_found() {
        let service = service();
        let err = service.get_item(ItemId::new(1)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(id) if id.as_i32() == 1));
    }

    #[tokio::test]
    async fn test_get_items_by_ids_omits_missing() {
        let service = service();
        let a = seeded(&service, ItemDraft::default()).await;
        let b = seeded(&service, ItemDraft::default()).await;

        let found = service
            .get_items_by_ids(&[a.id, ItemId::new(99), b.id])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_update_merges_only_provided_fields() {
        let service = service();
        let item = seeded(
            &service,
            ItemDraft {
                name: Some("Y".to_owned()),
                price: Some(9.0),
                ..ItemDraft::default()
            },
        )
        .await;

        // name set, price explicitly null: price must survive.
        let patch: ItemPatch =
            serde_json::from_str(r#"{"name": "X", "price": null}"#).unwrap();
        let updated = service.update_item(item.id, patch).await.unwrap();

        assert_eq!(updated.name.as_deref(), Some("X"));
        assert_eq!(updated.price, Some(9.0));
        let stored = service.get_item(item.id).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_accepts_zero_false_and_negative_values() {
        let service = service();
        let item = seeded(
            &service,
            ItemDraft {
                price: Some(9.0),
                quantity: Some(4),
                stock_available: Some(true),
                ..ItemDraft::default()
            },
        )
        .await;

        let patch = ItemPatch {
            price: Patch::Value(-1.5),
            quantity: Patch::Value(0),
            stock_available: Patch::Value(false),
            ..ItemPatch::default()
        };
        let updated = service.update_item(item.id, patch).await.unwrap();

        assert_eq!(updated.price, Some(-1.5));
        assert_eq!(updated.quantity, Some(0));
        assert_eq!(updated.stock_available, Some(false));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = service();
        let err = service
            .update_item(ItemId::new(7), ItemPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_add_tags_appends_only_new_tags() {
        let service = service();
        let item = seeded(&service, tagged(&["a", "b"])).await;

        let updated = service
            .add_tags(item.id, vec!["b".to_owned(), "c".to_owned()])
            .await
            .unwrap();
        assert_eq!(updated.tags.unwrap(), ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_add_tags_is_case_sensitive() {
        let service = service();
        let item = seeded(&service, tagged(&["Ink"])).await;

        let updated = service.add_tags(item.id, vec!["ink".to_owned()]).await.unwrap();
        assert_eq!(updated.tags.unwrap(), ["Ink", "ink"]);
    }

    #[tokio::test]
    async fn test_add_tags_is_idempotent() {
        let service = service();
        let item = seeded(&service, tagged(&["a", "b"])).await;

        let updated = service.add_tags(item.id, vec!["a".to_owned()]).await.unwrap();
        assert_eq!(updated.tags.unwrap(), ["a", "b"]);
    }

    #[tokio::test]
    async fn test_add_tags_starts_from_empty_when_never_set() {
        let service = service();
        let item = seeded(&service, ItemDraft::default()).await;

        let updated = service.add_tags(item.id, vec!["new".to_owned()]).await.unwrap();
        assert_eq!(updated.tags.unwrap(), ["new"]);
    }

    #[tokio::test]
    async fn test_remove_tags_drops_every_occurrence() {
        let service = service();
        // Duplicates can enter via the creation payload; removal clears all.
        let item = seeded(&service, tagged(&["x", "y", "x"])).await;

        let updated = service.remove_tags(item.id, vec!["x".to_owned()]).await.unwrap();
        assert_eq!(updated.tags.unwrap(), ["y"]);
    }

    #[tokio::test]
    async fn test_remove_tags_ignores_absent_tags() {
        let service = service();
        let item = seeded(&service, tagged(&["a"])).await;

        let updated = service
            .remove_tags(item.id, vec!["missing".to_owned()])
            .await
            .unwrap();
        assert_eq!(updated.tags.unwrap(), ["a"]);
    }

    #[tokio::test]
    async fn test_remove_tags_on_tagless_item_is_a_noop() {
        let service = service();
        let item = seeded(&service, ItemDraft::default()).await;

        let updated = service.remove_tags(item.id, vec!["a".to_owned()]).await.unwrap();
        assert_eq!(updated.tags, None);
    }

    #[tokio::test]
    async fn test_tag_operations_on_missing_item_are_not_found() {
        let service = service();
        let missing = ItemId::new(5);
        assert!(matches!(
            service.add_tags(missing, vec!["a".to_owned()]).await,
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(
            service.remove_tags(missing, vec!["a".to_owned()]).await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_item_deletes_the_record() {
        let service = service();
        let item = seeded(&service, ItemDraft::default()).await;

        service.remove_item(item.id).await.unwrap();
        assert!(matches!(
            service.get_item(item.id).await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_missing_item_is_not_found_and_mutates_nothing() {
        let service = service();
        seeded(&service, ItemDraft::default()).await;

        let err = service.remove_item(ItemId::new(999)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(id) if id.as_i32() == 999));

        let all = service.list_items(&ItemQuery::default()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_list_items_applies_filter_and_sort() {
        let service = service();
        for (name, price) in [("B", 10.0), ("A", 10.0), ("C", 20.0)] {
            seeded(
                &service,
                ItemDraft {
                    name: Some(name.to_owned()),
                    price: Some(price),
                    ..ItemDraft::default()
                },
            )
            .await;
        }

        let query = ItemQuery {
            sort: vec![
                "price,desc".parse().unwrap(),
                "name,asc".parse().unwrap(),
            ],
            ..ItemQuery::default()
        };
        let listed = service.list_items(&query).await.unwrap();
        let names: Vec<_> = listed.iter().map(|i| i.name.as_deref().unwrap()).collect();
        assert_eq!(names, ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn test_categories_come_back_deduplicated() {
        let service = service();
        for category in ["writing", "drawing", "writing"] {
            seeded(
                &service,
                ItemDraft {
                    category: Some(category.to_owned()),
                    ..ItemDraft::default()
                },
            )
            .await;
        }

        let categories = service.categories().await.unwrap();
        assert!(categories.contains("writing"));
        assert!(categories.contains("drawing"));
        assert_eq!(categories.len(), 2);
    }
}
