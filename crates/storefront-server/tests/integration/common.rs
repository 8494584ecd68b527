use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use storefront_db::Stores;
use storefront_server::app::build_app;
use storefront_server::config::ServerConfig;
use storefront_server::state::AppState;

/// The full application over in-memory stores. Repeated calls on clones of
/// the returned router share the same data.
pub fn test_app() -> Router {
    test_app_with(ServerConfig {
        port: 3000,
        dev_mode: false,
    })
}

pub fn test_app_with(config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        stores: Stores::memory(),
    });
    build_app(config, state)
}

/// Sends a request on a clone of the app and returns status plus parsed JSON
/// body (`Null` when the body is empty or not JSON).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub async fn send_json(
    app: &Router,
    method: &str,
    path: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn send_empty(
    app: &Router,
    method: &str,
    path: &str,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}
