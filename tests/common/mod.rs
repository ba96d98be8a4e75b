#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use entity_service::{
    app, AppState, EntityId, EntityStore, InMemoryEntityStore, PersistedEntity, StoreError, TransportEntity,
};

pub const TEST_BODY_LIMIT: usize = 64 * 1024;

/// Router over the given store, with the same layers the binary uses.
pub fn build_app(store: Arc<dyn EntityStore>) -> Router {
    app(AppState::new(store), TEST_BODY_LIMIT)
}

/// Router plus a handle on its in-memory store for direct inspection.
pub fn build_memory_app() -> (Router, Arc<InMemoryEntityStore>) {
    let store = Arc::new(InMemoryEntityStore::new());
    (build_app(store.clone()), store)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Body) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, Body::empty()).await
}

pub async fn post_json(app: &Router, uri: &str, json: Value) -> Response {
    send(app, Method::POST, uri, Body::from(json.to_string())).await
}

pub async fn put_json(app: &Router, uri: &str, json: Value) -> Response {
    send(app, Method::PUT, uri, Body::from(json.to_string())).await
}

pub async fn post_raw(app: &Router, uri: &str, raw: &'static str) -> Response {
    send(app, Method::POST, uri, Body::from(raw)).await
}

pub async fn put_raw(app: &Router, uri: &str, raw: &'static str) -> Response {
    send(app, Method::PUT, uri, Body::from(raw)).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Store whose every operation fails as if the database were down.
pub struct FailingStore;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".into())
}

#[async_trait]
impl EntityStore for FailingStore {
    async fn create(&self, _fields: &TransportEntity) -> Result<PersistedEntity, StoreError> {
        Err(down())
    }

    async fn list_all(&self) -> Result<Vec<PersistedEntity>, StoreError> {
        Err(down())
    }

    async fn find_by_id(&self, _id: EntityId) -> Result<PersistedEntity, StoreError> {
        Err(down())
    }

    async fn update(&self, _record: &PersistedEntity) -> Result<PersistedEntity, StoreError> {
        Err(down())
    }

    async fn delete(&self, _id: EntityId) -> Result<PersistedEntity, StoreError> {
        Err(down())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }
}

/// Store that hands back records without filtering empty descriptions.
pub struct UnfilteredStore(pub PersistedEntity);

#[async_trait]
impl EntityStore for UnfilteredStore {
    async fn create(&self, fields: &TransportEntity) -> Result<PersistedEntity, StoreError> {
        Ok(fields.clone().into_persisted(self.0.id))
    }

    async fn list_all(&self) -> Result<Vec<PersistedEntity>, StoreError> {
        Ok(vec![self.0.clone()])
    }

    async fn find_by_id(&self, id: EntityId) -> Result<PersistedEntity, StoreError> {
        if id == self.0.id {
            Ok(self.0.clone())
        } else {
            Err(StoreError::NotFound(id))
        }
    }

    async fn update(&self, record: &PersistedEntity) -> Result<PersistedEntity, StoreError> {
        Ok(record.clone())
    }

    async fn delete(&self, _id: EntityId) -> Result<PersistedEntity, StoreError> {
        Ok(self.0.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
