//! In-memory storage, for tests and embedding.

use std::cell::{Cell, RefCell};

use super::CatalogStore;
use crate::entities::EntityRecord;
use crate::error::{CatalogLoadError, CatalogSaveError};

/// Keeps the catalog in memory. Can be told to reject every save.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<EntityRecord>>,
    fail_saves: bool,
    saves: Cell<usize>,
}

impl MemoryStore {
    /// Create a store holding the given records.
    pub fn new(records: Vec<EntityRecord>) -> Self {
        Self {
            records: RefCell::new(records),
            fail_saves: false,
            saves: Cell::new(0),
        }
    }

    /// Make every subsequent save fail.
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Snapshot of the stored records.
    pub fn records(&self) -> Vec<EntityRecord> {
        self.records.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl CatalogStore for MemoryStore {
    fn load(&self) -> Result<Vec<EntityRecord>, CatalogLoadError> {
        let records = self.records.borrow();
        if records.is_empty() {
            return Err(CatalogLoadError::Empty("<memory>".into()));
        }
        Ok(records.clone())
    }

    fn save(&self, records: &[EntityRecord]) -> Result<(), CatalogSaveError> {
        if self.fail_saves {
            return Err(CatalogSaveError::Rejected("memory store is read-only".to_string()));
        }
        *self.records.borrow_mut() = records.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
