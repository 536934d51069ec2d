//! # File-Backed Document Store
//!
//! Keeps every collection in memory and mirrors it to
//! `<root>/<collection>.json` on each write. A write becomes visible to
//! readers only after its file is on disk. Collection files are
//! replaced atomically (temp file + rename), so a crash mid-write leaves the
//! previous version in place.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use super::document::{
    document_key, ensure_key, Document, DocumentStore, DocumentStream, FieldMatch,
};
use super::errors::{StoreError, StoreResult};
use super::memory::{Collection, MemoryStore};

const FILE_EXTENSION: &str = "json";

/// JSON-file document store
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    cache: MemoryStore,
    /// Serializes read-modify-commit so collection files land in write order
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (or create) a store rooted at `root`, loading every collection file found there
    pub async fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;

        let cache = MemoryStore::new();
        let mut entries = fs::read_dir(&root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let Some(collection) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let documents = read_collection(collection, &path).await?;
            tracing::debug!(collection, count = documents.len(), "loaded collection");
            cache.load(collection, documents).await;
        }

        Ok(Self {
            root,
            cache,
            write_lock: Mutex::new(()),
        })
    }

    /// Directory holding the collection files
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: &str) -> StoreResult<PathBuf> {
        if collection.is_empty()
            || collection.starts_with('.')
            || collection.contains(|c: char| c == '/' || c == '\\')
        {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid collection name: {:?}", collection),
            )));
        }
        Ok(self.root.join(format!("{}.{}", collection, FILE_EXTENSION)))
    }

    /// Write `documents` to disk, then make them the visible collection.
    ///
    /// Readers keep seeing the previous contents when the write fails.
    async fn commit(
        &self,
        collection: &str,
        path: &Path,
        documents: Collection,
    ) -> StoreResult<()> {
        write_collection(path, &documents).await?;
        self.cache.load(collection, documents).await;
        Ok(())
    }
}

async fn write_collection(path: &Path, documents: &Collection) -> StoreResult<()> {
    let documents: Vec<&Document> = documents.values().collect();
    let bytes = serde_json::to_vec_pretty(&documents)?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

async fn read_collection(collection: &str, path: &Path) -> StoreResult<Collection> {
    let bytes = fs::read(path).await?;
    if bytes.is_empty() {
        return Ok(BTreeMap::new());
    }

    let documents: Vec<Document> = serde_json::from_slice(&bytes)?;
    let mut loaded = BTreeMap::new();
    for document in documents {
        let key = document_key(&document)
            .ok_or_else(|| StoreError::corrupt(collection, "<none>", "document has no key"))?
            .to_string();
        loaded.insert(key, document);
    }
    Ok(loaded)
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Document>> {
        self.cache.get(collection, key).await
    }

    async fn scan(
        &self,
        collection: &str,
        filter: Option<FieldMatch>,
    ) -> StoreResult<DocumentStream> {
        self.cache.scan(collection, filter).await
    }

    async fn upsert(&self, collection: &str, mut document: Document) -> StoreResult<Document> {
        let path = self.collection_path(collection)?;
        let key = ensure_key(collection, &mut document)?;

        let _guard = self.write_lock.lock().await;
        let mut documents = self.cache.snapshot(collection).await;
        documents.insert(key, document.clone());
        self.commit(collection, &path, documents).await?;
        Ok(document)
    }

    async fn delete(&self, collection: &str, key: &str) -> StoreResult<()> {
        let path = self.collection_path(collection)?;

        let _guard = self.write_lock.lock().await;
        let mut documents = self.cache.snapshot(collection).await;
        if documents.remove(key).is_none() {
            return Ok(());
        }
        self.commit(collection, &path, documents).await
    }

    async fn clear(&self, collection: &str) -> StoreResult<()> {
        let path = self.collection_path(collection)?;

        let _guard = self.write_lock.lock().await;
        self.commit(collection, &path, Collection::new()).await
    }
}
