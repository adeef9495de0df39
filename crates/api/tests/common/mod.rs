#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use catalog_api::config::ServerConfig;
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;
use catalog_db::store::MemoryStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router over the given in-memory store.
///
/// Goes through [`build_app_router`] so tests exercise the same middleware
/// stack as production. The returned router is cheap to clone; clones share
/// the store.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState { store };
    build_app_router(state, &config).expect("test router")
}

/// Fresh store plus a router over it.
pub fn test_app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let app = build_test_app(Arc::clone(&store));
    (store, app)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn delete_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::DELETE, uri, Some(body)).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Pull the generated id out of a `"<Entity> id:<id> has been added!"` message.
pub fn added_id(message: &str, entity: &str) -> String {
    message
        .strip_prefix(&format!("{entity} id:"))
        .and_then(|rest| rest.strip_suffix(" has been added!"))
        .unwrap_or_else(|| panic!("unexpected confirmation: {message}"))
        .to_string()
}
