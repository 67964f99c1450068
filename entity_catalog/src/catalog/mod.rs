//! The catalog - the ordered collection of entities the engine guesses between.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::entities::EntityRecord;
use crate::error::AddEntityError;

/// Ordered collection of entity records.
///
/// Records keep their insertion order. Names are unique case-insensitively for every
/// record added through [`Catalog::add`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entities: Vec<EntityRecord>,
}

impl Catalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from loaded records, keeping their order.
    ///
    /// Duplicate names coming from storage are kept but logged.
    pub fn from_records(entities: Vec<EntityRecord>) -> Self {
        for (index, record) in entities.iter().enumerate() {
            if entities[..index].iter().any(|earlier| earlier.is_named(&record.name)) {
                warn!(name = %record.name, "catalog contains a duplicate entity name");
            }
        }
        Self { entities }
    }

    /// All records in order.
    pub fn entities(&self) -> &[EntityRecord] {
        &self.entities
    }

    /// Get a record by position.
    pub fn get(&self, index: usize) -> Option<&EntityRecord> {
        self.entities.get(index)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Find a record by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&EntityRecord> {
        self.entities.iter().find(|e| e.is_named(name))
    }

    /// Check if a name is already taken (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Append a new record.
    ///
    /// Rejects blank and duplicate names without touching the catalog. The stored
    /// name is trimmed.
    pub fn add(&mut self, mut record: EntityRecord) -> Result<usize, AddEntityError> {
        let name = record.name.trim().to_string();
        if name.is_empty() {
            return Err(AddEntityError::BlankName);
        }
        if self.contains(&name) {
            return Err(AddEntityError::Duplicate(name));
        }
        record.name = name;
        self.entities.push(record);
        Ok(self.entities.len() - 1)
    }
}
