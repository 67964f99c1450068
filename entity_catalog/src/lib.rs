//! # Entity Catalog
//!
//! The catalog crate - holds the attribute schema, the entity records the engine guesses
//! between, and the storage seam used to load and persist them.
//! This crate is a passive data holder and does not contain any deduction logic.

pub mod catalog;
pub mod entities;
pub mod error;
pub mod storage;

pub use catalog::*;
pub use entities::*;
pub use error::*;
pub use storage::*;
