//! # Document Store Adapter
//!
//! Async access to document collections: the raw [`DocumentStore`] seam,
//! its in-memory and file-backed implementations, and the typed
//! [`Repository`] the services work against.

pub mod document;
pub mod errors;
pub mod file;
pub mod memory;
pub mod repository;

pub use document::{Document, DocumentStore, DocumentStream, FieldMatch, KEY_FIELD};
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::{Record, RecordStream, Repository};
