//! # In-Memory Document Store
//!
//! Collections live in ordered maps behind an async read/write lock.
//! Cursors are snapshots taken under the read lock, so a scan never holds
//! the lock while its consumer is suspended.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use tokio::sync::RwLock;

use super::document::{ensure_key, Document, DocumentStore, DocumentStream, FieldMatch};
use super::errors::StoreResult;

/// Documents of one collection, in key order
pub type Collection = BTreeMap<String, Document>;

/// In-memory store for tests and the `memory` backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Copy of a whole collection
    pub(crate) async fn snapshot(&self, collection: &str) -> Collection {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Replace a whole collection
    pub(crate) async fn load(&self, collection: &str, documents: Collection) {
        self.collections
            .write()
            .await
            .insert(collection.to_string(), documents);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|c| c.get(key)).cloned())
    }

    async fn scan(
        &self,
        collection: &str,
        filter: Option<FieldMatch>,
    ) -> StoreResult<DocumentStream> {
        let collections = self.collections.read().await;
        let documents: Vec<Document> = collections
            .get(collection)
            .map(|c| {
                c.values()
                    .filter(|d| filter.as_ref().map_or(true, |f| f.matches(d)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(stream::iter(documents.into_iter().map(Ok)).boxed())
    }

    async fn upsert(&self, collection: &str, mut document: Document) -> StoreResult<Document> {
        let key = ensure_key(collection, &mut document)?;

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key, document.clone());

        Ok(document)
    }

    async fn delete(&self, collection: &str, key: &str) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        if let Some(c) = collections.get_mut(collection) {
            c.remove(key);
        }
        Ok(())
    }

    async fn clear(&self, collection: &str) -> StoreResult<()> {
        self.collections.write().await.remove(collection);
        Ok(())
    }
}
