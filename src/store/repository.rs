//! # Typed Repository
//!
//! Binds one named collection of a [`DocumentStore`] to a record type.
//! Records travel to and from the store as JSON documents; key assignment
//! happens in the store, timestamps are stamped here through the
//! [`Record`] hooks.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::stream::{BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::document::{document_key, Document, DocumentStore, DocumentStream, FieldMatch};
use super::errors::{StoreError, StoreResult};

/// Cursor over decoded records
pub type RecordStream<R> = BoxStream<'static, StoreResult<R>>;

/// A persisted record type
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Store-assigned key, `None` until first saved
    fn id(&self) -> Option<&str>;

    /// Called before the first save of a record without a key
    fn before_create(&mut self, now: DateTime<Utc>);

    /// Called before saving a record that already has a key
    fn before_update(&mut self, now: DateTime<Utc>);
}

/// Typed access to one collection
pub struct Repository<R> {
    store: Arc<dyn DocumentStore>,
    collection: String,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            collection: self.collection.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> Repository<R> {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            _record: PhantomData,
        }
    }

    /// Name of the backing collection
    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<R>> {
        self.store
            .get(&self.collection, id)
            .await?
            .map(|document| decode(&self.collection, document))
            .transpose()
    }

    /// Every record, in store order
    pub async fn find_all(&self) -> StoreResult<RecordStream<R>> {
        let cursor = self.store.scan(&self.collection, None).await?;
        Ok(self.decode_stream(cursor))
    }

    /// First record whose `field` equals `value`
    pub async fn find_first_by(
        &self,
        field: &str,
        value: impl Into<Value>,
    ) -> StoreResult<Option<R>> {
        self.store
            .find_first(&self.collection, FieldMatch::new(field, value))
            .await?
            .map(|document| decode(&self.collection, document))
            .transpose()
    }

    /// Every record whose `field` equals `value`
    pub async fn find_all_by(
        &self,
        field: &str,
        value: impl Into<Value>,
    ) -> StoreResult<RecordStream<R>> {
        let cursor = self
            .store
            .scan(&self.collection, Some(FieldMatch::new(field, value)))
            .await?;
        Ok(self.decode_stream(cursor))
    }

    /// Insert or replace a record, returning it as persisted
    pub async fn save(&self, mut record: R) -> StoreResult<R> {
        let now = Utc::now();
        if record.id().is_none() {
            record.before_create(now);
        } else {
            record.before_update(now);
        }

        let document = encode(&self.collection, &record)?;
        let saved = self.store.upsert(&self.collection, document).await?;
        decode(&self.collection, saved)
    }

    pub async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        self.store.delete(&self.collection, id).await
    }

    pub async fn delete_all(&self) -> StoreResult<()> {
        self.store.clear(&self.collection).await
    }

    fn decode_stream(&self, cursor: DocumentStream) -> RecordStream<R> {
        let collection = self.collection.clone();
        cursor
            .map(move |item| item.and_then(|document| decode(&collection, document)))
            .boxed()
    }
}

fn encode<R: Record>(collection: &str, record: &R) -> StoreResult<Document> {
    match serde_json::to_value(record)? {
        Value::Object(document) => Ok(document),
        other => Err(StoreError::corrupt(
            collection,
            record.id().unwrap_or("<new>"),
            format!("record encoded as {} instead of an object", other),
        )),
    }
}

fn decode<R: Record>(collection: &str, document: Document) -> StoreResult<R> {
    let key = document_key(&document).unwrap_or("<none>").to_string();
    serde_json::from_value(Value::Object(document))
        .map_err(|e| StoreError::corrupt(collection, key, e))
}
