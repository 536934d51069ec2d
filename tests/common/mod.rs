//! Shared fixtures for endpoint tests
//!
//! Builds the full router over a chosen store and drives it in-process with
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use taproom::http_server::{HttpServer, HttpServerConfig};
use taproom::service::{BeerService, CustomerService};
use taproom::store::{
    Document, DocumentStore, DocumentStream, FieldMatch, MemoryStore, Repository, StoreError,
    StoreResult,
};

// =============================================================================
// Test Utilities
// =============================================================================

pub fn services(store: Arc<dyn DocumentStore>) -> (BeerService, CustomerService) {
    (
        BeerService::new(Repository::new(store.clone(), "beer")),
        CustomerService::new(Repository::new(store, "customer")),
    )
}

pub fn app_with(store: Arc<dyn DocumentStore>) -> Router {
    let (beers, customers) = services(store);
    HttpServer::new(HttpServerConfig::default(), beers, customers).router()
}

pub fn app() -> Router {
    app_with(Arc::new(MemoryStore::new()))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// Send a raw, possibly malformed, JSON body
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &'static str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST a payload and return the `Location` of the created record
pub async fn create(app: &Router, collection: &str, body: Value) -> String {
    let response = send(app, Method::POST, collection, Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

// =============================================================================
// Failing Store
// =============================================================================

/// Store whose every call fails as unreachable
pub struct UnavailableStore;

fn down() -> StoreError {
    StoreError::unavailable("connection refused")
}

#[async_trait]
impl DocumentStore for UnavailableStore {
    async fn get(&self, _collection: &str, _key: &str) -> StoreResult<Option<Document>> {
        Err(down())
    }

    async fn scan(
        &self,
        _collection: &str,
        _filter: Option<FieldMatch>,
    ) -> StoreResult<DocumentStream> {
        Err(down())
    }

    async fn upsert(&self, _collection: &str, _document: Document) -> StoreResult<Document> {
        Err(down())
    }

    async fn delete(&self, _collection: &str, _key: &str) -> StoreResult<()> {
        Err(down())
    }

    async fn clear(&self, _collection: &str) -> StoreResult<()> {
        Err(down())
    }
}
