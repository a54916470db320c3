//! Entity catalog snapshots.
//!
//! A catalog is an immutable snapshot of every known entity, built in one
//! piece and replaced wholesale on reload. Readers hold an `Arc` to the
//! snapshot they started with, so a detection pass in progress always sees
//! one consistent catalog version and no locking is needed beyond the brief
//! guard that swaps or clones the `Arc`.

use std::sync::{Arc, PoisonError, RwLock};

use storylink_domain::common::is_blank;
use storylink_domain::{Entity, EntityId};

use crate::infrastructure::ports::{EntityStore, StoreError};

/// Immutable snapshot of the known entities, in load order.
#[derive(Debug, Default)]
pub struct EntityCatalog {
    entities: Vec<Arc<Entity>>,
}

impl EntityCatalog {
    /// An empty catalog - the valid initial state before any reload.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from entities in their load order. Load order is
    /// significant: it decides lookup ambiguity and the tie-break between
    /// equal-length match terms.
    pub fn from_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            entities: entities.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn entities(&self) -> &[Arc<Entity>] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The entity whose name or any alias equals `term` exactly
    /// (case-sensitive), or `None` for a blank term or no match.
    ///
    /// When several entities share the term, the first in catalog order wins;
    /// ambiguity is not an error.
    pub fn find_by_exact_term(&self, term: &str) -> Option<&Arc<Entity>> {
        if is_blank(term) {
            return None;
        }
        self.entities.iter().find(|e| e.has_exact_term(term))
    }

    /// The entity with the given id, or `None`.
    pub fn find_by_id(&self, id: &EntityId) -> Option<&Arc<Entity>> {
        self.entities.iter().find(|e| &e.id == id)
    }
}

/// Shared, reloadable holder for the current catalog snapshot.
///
/// `reload` builds a complete new snapshot before swapping it in, so the
/// catalog is never observed partially populated; on a store failure the
/// previous snapshot is retained unchanged.
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: RwLock<Arc<EntityCatalog>>,
}

impl CatalogHandle {
    /// A handle starting from an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot. Cheap; clones an `Arc`.
    pub fn snapshot(&self) -> Arc<EntityCatalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the whole catalog from the store.
    ///
    /// Malformed records have already been skipped by the store; a store-level
    /// failure leaves the previous snapshot in place and is returned.
    pub async fn reload(&self, store: &dyn EntityStore) -> Result<(), StoreError> {
        let records = store.list_records().await?;
        let snapshot = EntityCatalog::from_entities(
            records.into_iter().map(|record| record.into_entity()),
        );
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(snapshot);
        Ok(())
    }

    /// Passthrough to the store for an entity's extended free-text content.
    pub async fn load_extended_content(
        &self,
        entity: &Entity,
        store: &dyn EntityStore,
    ) -> Result<Option<String>, StoreError> {
        store.load_extended_content(entity).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    use storylink_domain::EntityType;

    use crate::infrastructure::ports::{EntityRecord, MockEntityStore};

    fn entity(id: &str, name: &str, aliases: &[&str]) -> Entity {
        Entity::new(EntityId::from(id), name, EntityType::Character)
            .with_aliases(aliases.iter().copied())
    }

    fn record(id: &str, name: &str) -> EntityRecord {
        EntityRecord {
            id: id.to_string(),
            name: name.to_string(),
            aliases: Vec::new(),
            tags: Vec::new(),
            entity_type: EntityType::Character,
            source_ref: None,
        }
    }

    #[test]
    fn test_find_by_exact_term_matches_name_and_alias() {
        let catalog = EntityCatalog::from_entities([entity("c1", "Elena", &["El"])]);
        assert!(catalog.find_by_exact_term("Elena").is_some());
        assert!(catalog.find_by_exact_term("El").is_some());
        assert!(catalog.find_by_exact_term("elena").is_none());
        assert!(catalog.find_by_exact_term("Marcus").is_none());
    }

    #[test]
    fn test_find_by_exact_term_rejects_blank() {
        let catalog = EntityCatalog::from_entities([entity("c1", "Elena", &[])]);
        assert!(catalog.find_by_exact_term("").is_none());
        assert!(catalog.find_by_exact_term("   ").is_none());
    }

    #[test]
    fn test_ambiguous_term_resolves_to_first_in_catalog_order() {
        let catalog = EntityCatalog::from_entities([
            entity("c1", "Dr. Marcus Webb", &["Doc"]),
            entity("c2", "Doc Holliday", &["Doc"]),
        ]);
        let found = catalog.find_by_exact_term("Doc").expect("found");
        assert_eq!(found.id.as_str(), "c1");
    }

    #[test]
    fn test_find_by_id() {
        let catalog = EntityCatalog::from_entities([entity("c1", "Elena", &[])]);
        assert!(catalog.find_by_id(&EntityId::from("c1")).is_some());
        assert!(catalog.find_by_id(&EntityId::from("c2")).is_none());
    }

    #[tokio::test]
    async fn test_reload_replaces_snapshot() {
        let handle = CatalogHandle::new();
        assert!(handle.snapshot().is_empty());

        let mut store = MockEntityStore::new();
        store
            .expect_list_records()
            .returning(|| Ok(vec![record("c1", "Elena")]));

        handle.reload(&store).await.expect("reload");
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.find_by_exact_term("Elena").is_some());
    }

    #[tokio::test]
    async fn test_failed_reload_retains_previous_snapshot() {
        let handle = CatalogHandle::new();

        let mut good = MockEntityStore::new();
        good.expect_list_records()
            .returning(|| Ok(vec![record("c1", "Elena")]));
        handle.reload(&good).await.expect("reload");

        let mut bad = MockEntityStore::new();
        bad.expect_list_records().returning(|| {
            Err(StoreError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "store offline",
            )))
        });
        let result = handle.reload(&bad).await;
        assert!(result.is_err());

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.find_by_exact_term("Elena").is_some());
    }

    #[tokio::test]
    async fn test_detection_pass_keeps_its_snapshot_across_reload() {
        let handle = CatalogHandle::new();

        let mut store = MockEntityStore::new();
        store
            .expect_list_records()
            .returning(|| Ok(vec![record("c1", "Elena")]));
        handle.reload(&store).await.expect("reload");

        let held = handle.snapshot();

        let mut store2 = MockEntityStore::new();
        store2.expect_list_records().returning(|| Ok(vec![]));
        handle.reload(&store2).await.expect("reload");

        // The held snapshot is unaffected by the swap.
        assert_eq!(held.len(), 1);
        assert!(handle.snapshot().is_empty());
    }
}
