//! Codex entities - the named story elements that link detection matches on
//!
//! An entity's `name` and every alias are independent, interchangeable match
//! terms pointing back to the same entity. Terms are never deduplicated, not
//! across entities and not within one entity's alias list; when two entities
//! share a term, match priority is resolved by term length, not by entity.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::is_blank;
use crate::error::DomainError;
use crate::ids::EntityId;

/// Kind of story element an entity represents.
///
/// Only `Character` is currently populated by the editor shell; the other
/// kinds are scanned by the store and simply come back empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    #[default]
    Character,
    Location,
    Event,
    Item,
    Custom,
}

impl EntityType {
    /// All entity kinds, in the order the store scans them.
    pub const ALL: [EntityType; 5] = [
        EntityType::Character,
        EntityType::Location,
        EntityType::Event,
        EntityType::Item,
        EntityType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Character => "character",
            EntityType::Location => "location",
            EntityType::Event => "event",
            EntityType::Item => "item",
            EntityType::Custom => "custom",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "character" => Ok(Self::Character),
            "location" => Ok(Self::Location),
            "event" => Ok(Self::Event),
            "item" => Ok(Self::Item),
            "custom" => Ok(Self::Custom),
            other => Err(DomainError::parse(format!(
                "unknown entity type: '{}'",
                other
            ))),
        }
    }
}

/// A named story element in the codex.
///
/// Entities are created and mutated by the catalog loader and persistence
/// layer; during a detection pass they are read-only.
///
/// # Invariants
///
/// - `name` may be blank only transiently (a blank name contributes no match
///   term and the entity is simply never matched by name)
/// - `aliases` preserves insertion order and may contain duplicates
/// - `source_ref` is an opaque back-reference to the persisted record; it is
///   never parsed here, only handed back to the store for extended-content
///   lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub entity_type: EntityType,
    /// Back-reference to the persisted record, if the entity came from a store.
    #[serde(default)]
    pub source_ref: Option<PathBuf>,
    /// Free-form tags carried from the record; unused by matching.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Entity {
    /// Create an entity with no aliases, tags, or source reference.
    pub fn new(id: EntityId, name: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            id,
            name: name.into(),
            aliases: Vec::new(),
            entity_type,
            source_ref: None,
            tags: Vec::new(),
        }
    }

    /// Attach aliases, preserving the given order.
    pub fn with_aliases(mut self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// All searchable terms for this entity: the name first (if non-blank),
    /// then each non-blank alias in insertion order.
    pub fn match_terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .filter(|term| !is_blank(term))
    }

    /// Whether `term` equals the name or any alias exactly (case-sensitive).
    ///
    /// A blank `term` matches nothing.
    pub fn has_exact_term(&self, term: &str) -> bool {
        !is_blank(term) && (self.name == term || self.aliases.iter().any(|a| a == term))
    }
}
