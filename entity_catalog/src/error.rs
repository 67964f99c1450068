//! Error types for catalog loading, saving, and mutation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a catalog. All of them are fatal for a session.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("catalog file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("could not read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog {} is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog {} contains no entities", .0.display())]
    Empty(PathBuf),
}

/// Errors raised while persisting a catalog. Callers treat these as recoverable.
#[derive(Debug, Error)]
pub enum CatalogSaveError {
    #[error("could not write catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("catalog storage rejected the write: {0}")]
    Rejected(String),
}

/// Errors raised when adding an entity to the catalog. The catalog is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddEntityError {
    #[error("an entity named '{0}' already exists")]
    Duplicate(String),

    #[error("entity name cannot be blank")]
    BlankName,
}
