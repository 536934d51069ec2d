//! # Document Store Interface
//!
//! The async seam between the services and whatever holds the documents.
//! Every operation is non-blocking; reads resolve to zero-or-one documents
//! or to an owned cursor over zero-or-many.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};

/// A stored document: a JSON object keyed by [`KEY_FIELD`]
pub type Document = Map<String, Value>;

/// Cursor over documents. Owns its data, so it may outlive the store borrow.
pub type DocumentStream = BoxStream<'static, StoreResult<Document>>;

/// Field holding the primary key of every document
pub const KEY_FIELD: &str = "_id";

/// Equality predicate on a top-level document field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub field: String,
    pub value: Value,
}

impl FieldMatch {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Check whether a document satisfies this predicate
    pub fn matches(&self, document: &Document) -> bool {
        document.get(&self.field) == Some(&self.value)
    }
}

/// Read the key of a document, if it has one.
///
/// Null and empty-string keys count as absent.
pub fn document_key(document: &Document) -> Option<&str> {
    match document.get(KEY_FIELD) {
        Some(Value::String(key)) if !key.is_empty() => Some(key),
        _ => None,
    }
}

/// Generate a fresh document key
pub fn new_key() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Make sure `document` carries a usable key, assigning one when absent.
///
/// Returns the key. Non-string keys are rejected.
pub(crate) fn ensure_key(collection: &str, document: &mut Document) -> StoreResult<String> {
    match document.get(KEY_FIELD) {
        Some(Value::String(key)) if !key.is_empty() => Ok(key.clone()),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            let key = new_key();
            document.insert(KEY_FIELD.to_string(), Value::String(key.clone()));
            Ok(key)
        }
        Some(other) => Err(StoreError::corrupt(
            collection,
            other.to_string(),
            "document key must be a string",
        )),
    }
}

/// Async document collection store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point lookup by key
    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Document>>;

    /// Open a cursor over a collection in key order, optionally filtered
    async fn scan(&self, collection: &str, filter: Option<FieldMatch>)
        -> StoreResult<DocumentStream>;

    /// First document (in key order) matching the filter
    async fn find_first(
        &self,
        collection: &str,
        filter: FieldMatch,
    ) -> StoreResult<Option<Document>> {
        let mut cursor = self.scan(collection, Some(filter)).await?;
        cursor.next().await.transpose()
    }

    /// Insert or replace by key, assigning a key when the document has none.
    ///
    /// Returns the document as persisted.
    async fn upsert(&self, collection: &str, document: Document) -> StoreResult<Document>;

    /// Delete by key. Deleting a missing key succeeds.
    async fn delete(&self, collection: &str, key: &str) -> StoreResult<()>;

    /// Remove every document in a collection
    async fn clear(&self, collection: &str) -> StoreResult<()>;
}
