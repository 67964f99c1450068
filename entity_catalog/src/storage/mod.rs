//! Catalog storage - the seam through which catalogs are loaded and persisted.
//!
//! The engine only needs two operations: load the whole catalog once, and save the
//! whole catalog after an entity is added. Both are blocking and all-or-nothing.

mod json;
mod memory;

pub use json::*;
pub use memory::*;

use crate::entities::EntityRecord;
use crate::error::{CatalogLoadError, CatalogSaveError};

/// Durable storage for a catalog.
pub trait CatalogStore {
    /// Load every record, in stored order.
    ///
    /// A missing, unreadable, malformed, or empty catalog is an error.
    fn load(&self) -> Result<Vec<EntityRecord>, CatalogLoadError>;

    /// Replace the stored catalog with `records`.
    fn save(&self, records: &[EntityRecord]) -> Result<(), CatalogSaveError>;
}
