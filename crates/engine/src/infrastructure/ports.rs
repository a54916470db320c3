//! Entity store port.
//!
//! The catalog never touches the filesystem directly; it goes through this
//! trait so reloads can be tested against a mock and so the editor shell can
//! substitute its own persistence.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use storylink_domain::{Entity, EntityId, EntityType};

/// Entity store operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying I/O failure on an existing store root.
    #[error("Entity store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A single record failed to deserialize. The filesystem store recovers
    /// from this locally by skipping the record; it only surfaces when a
    /// caller reads one record directly.
    #[error("Failed to parse entity record {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One entity record as persisted by the editor shell.
///
/// The on-disk shape carries `id`, `name`, `aliases`, and `tags`; the store
/// fills in `entity_type` (from the subdirectory the record was found in) and
/// `source_ref` (the record's own path) after deserializing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip)]
    pub entity_type: EntityType,
    #[serde(skip)]
    pub source_ref: Option<PathBuf>,
}

impl EntityRecord {
    pub fn into_entity(self) -> Entity {
        Entity {
            id: EntityId::from(self.id),
            name: self.name,
            aliases: self.aliases,
            entity_type: self.entity_type,
            source_ref: self.source_ref,
            tags: self.tags,
        }
    }
}

/// Read access to the persisted codex.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Enumerate every readable record in the store.
    ///
    /// A missing store root is a valid empty codex and yields `Ok(vec![])`;
    /// individual unreadable records are skipped with a logged warning rather
    /// than failing the enumeration.
    async fn list_records(&self) -> Result<Vec<EntityRecord>, StoreError>;

    /// Fetch the extended free-text content associated with an entity, or
    /// `Ok(None)` if the entity has no `source_ref` or no content exists.
    async fn load_extended_content(&self, entity: &Entity) -> Result<Option<String>, StoreError>;
}
