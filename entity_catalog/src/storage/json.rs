//! JSON file storage.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::CatalogStore;
use crate::entities::EntityRecord;
use crate::error::{CatalogLoadError, CatalogSaveError};

/// Stores the catalog as a pretty-printed JSON array of records.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use the first candidate path that exists.
    pub fn locate<P: AsRef<Path>>(candidates: &[P]) -> Option<Self> {
        candidates
            .iter()
            .map(|path| path.as_ref())
            .find(|path| path.is_file())
            .map(Self::new)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CatalogStore for JsonFileStore {
    fn load(&self) -> Result<Vec<EntityRecord>, CatalogLoadError> {
        if !self.path.exists() {
            return Err(CatalogLoadError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path).map_err(|source| CatalogLoadError::Io {
            path: self.path.clone(),
            source,
        })?;

        let records: Vec<EntityRecord> =
            serde_json::from_str(&content).map_err(|source| CatalogLoadError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        if records.is_empty() {
            return Err(CatalogLoadError::Empty(self.path.clone()));
        }

        debug!(path = %self.path.display(), count = records.len(), "catalog loaded");
        Ok(records)
    }

    fn save(&self, records: &[EntityRecord]) -> Result<(), CatalogSaveError> {
        let content = serde_json::to_string_pretty(records)?;

        // Write beside the target and rename over it so a failed write never truncates
        // the existing catalog.
        let temp = self.temp_path();
        let io_error = |source: std::io::Error| CatalogSaveError::Io {
            path: self.path.clone(),
            source,
        };
        fs::write(&temp, content).map_err(io_error)?;
        if let Err(source) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(io_error(source));
        }

        debug!(path = %self.path.display(), count = records.len(), "catalog saved");
        Ok(())
    }
}
