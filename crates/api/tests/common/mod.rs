#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use bagline_api::auth::jwt::JwtConfig;
use bagline_api::config::{ServerConfig, StoreBackend, StoreConfig};
use bagline_api::router::build_app_router;
use bagline_api::state::AppState;
use bagline_db::store::{Row, SelectQuery, StoreResult, Table};
use bagline_db::{MemoryStore, RecordStore, StoreError};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// Build a test `ServerConfig` with safe defaults and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        store: StoreConfig {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 1,
            run_migrations: false,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_hours: 1,
        },
    }
}

/// A fresh application over an empty [`MemoryStore`].
///
/// The returned router is cheap to clone; clones share the same store.
pub fn build_test_app() -> Router {
    build_test_app_with_store(Arc::new(MemoryStore::new()))
}

/// The full application over an arbitrary store.
pub fn build_test_app_with_store(store: Arc<dyn RecordStore>) -> Router {
    let config = test_config();
    let state = AppState::new(store, config.clone());
    build_app_router(state, &config)
}

/// Message every [`UnreachableStore`] call fails with.
pub const UNREACHABLE_MESSAGE: &str = "connection to record store lost";

/// A store whose every call fails, as when the database is down.
pub struct UnreachableStore;

impl UnreachableStore {
    fn fail<T>() -> StoreResult<T> {
        Err(StoreError::Database(sqlx::Error::Protocol(
            UNREACHABLE_MESSAGE.to_string(),
        )))
    }
}

#[async_trait::async_trait]
impl RecordStore for UnreachableStore {
    async fn insert(&self, _table: Table, _row: Row) -> StoreResult<Vec<Row>> {
        Self::fail()
    }

    async fn update(&self, _table: Table, _id: Uuid, _row: Row) -> StoreResult<Vec<Row>> {
        Self::fail()
    }

    async fn delete(&self, _table: Table, _id: Uuid) -> StoreResult<Vec<Row>> {
        Self::fail()
    }

    async fn select(&self, _table: Table, _query: &SelectQuery) -> StoreResult<Vec<Row>> {
        Self::fail()
    }

    async fn health_check(&self) -> StoreResult<()> {
        Self::fail()
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn with_json(app: &Router, method: Method, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    with_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response {
    with_json(app, Method::PUT, uri, body).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
