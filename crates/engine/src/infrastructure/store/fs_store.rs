//! Filesystem entity store.
//!
//! Reads the codex the editor shell persists under a data root with one
//! subdirectory per entity kind (`characters/`, `locations/`, ...), one JSON
//! record per entity. Extended content lives next to a record as a Markdown
//! file with the same stem (`elena.json` -> `elena.md`).

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use storylink_domain::{Entity, EntityType};

use crate::infrastructure::ports::{EntityRecord, EntityStore, StoreError};

/// Subdirectory of the data root scanned for a given entity kind.
fn subdir(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Character => "characters",
        EntityType::Location => "locations",
        EntityType::Event => "events",
        EntityType::Item => "items",
        EntityType::Custom => "custom",
    }
}

/// Entity store backed by a directory of JSON records.
#[derive(Debug, Clone)]
pub struct FsEntityStore {
    data_root: PathBuf,
}

impl FsEntityStore {
    /// Create a store rooted at `data_root` (e.g. the editor's `data/`
    /// directory). The root does not have to exist yet; a missing root reads
    /// as an empty codex.
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Read and deserialize a single record file.
    async fn read_record(
        &self,
        path: &Path,
        entity_type: EntityType,
    ) -> Result<EntityRecord, StoreError> {
        let content = fs::read_to_string(path).await?;
        let mut record: EntityRecord =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        record.entity_type = entity_type;
        record.source_ref = Some(path.to_path_buf());
        Ok(record)
    }

    /// Collect the records of one entity kind, skipping unreadable files.
    async fn list_kind(
        &self,
        entity_type: EntityType,
        records: &mut Vec<EntityRecord>,
    ) -> Result<(), StoreError> {
        let dir = self.data_root.join(subdir(entity_type));
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "Entity directory missing, treating as empty");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.read_record(&path, entity_type).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Skipping unreadable entity record"
                    );
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl EntityStore for FsEntityStore {
    async fn list_records(&self) -> Result<Vec<EntityRecord>, StoreError> {
        let mut records = Vec::new();
        for entity_type in EntityType::ALL {
            self.list_kind(entity_type, &mut records).await?;
        }
        Ok(records)
    }

    async fn load_extended_content(&self, entity: &Entity) -> Result<Option<String>, StoreError> {
        let Some(record_path) = entity.source_ref.as_deref() else {
            return Ok(None);
        };
        let content_path = record_path.with_extension("md");
        match fs::read_to_string(&content_path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
