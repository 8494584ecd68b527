//! Application assembly: route table, middleware stack, and documentation
//! mounts. Building the router is separate from binding a listener so tests
//! can drive the whole stack in process.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::response::Html;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ServerConfig;
use crate::middleware::{BODY_LIMIT, enforce_parsable_body, log_requests};
use crate::openapi::ApiDoc;
use crate::routes;
use crate::state::AppState;

/// Landing page served at the exact root path.
const WELCOME: &str = "Welcome to E-commerce API! Go to <strong><a href='/api-docs'>/api-docs</a></strong> to see the documentation";

/// Mounted prefixes in registration order, one router per resource group.
pub fn route_table() -> Vec<(&'static str, Router<Arc<AppState>>)> {
    vec![
        ("/users", routes::users::router()),
        ("/paymentstatus", routes::payment_statuses::router()),
        ("/paymentmethod", routes::payment_methods::router()),
        ("/auth", routes::auth::router()),
        ("/permissions", routes::permissions::router()),
        ("/orders", routes::orders::router()),
        ("/products", routes::products::router()),
        ("/status", routes::statuses::router()),
        ("/report", routes::reports::router()),
    ]
}

/// Assembles the full application. The returned router is not bound to any
/// listener.
///
/// Request path through the middleware stack: size limit, body screening,
/// CORS, then (dev mode only) the request logger, then routing. Anything
/// that matches no route gets axum's plain 404.
pub fn build_app(config: ServerConfig, state: Arc<AppState>) -> Router {
    let app = route_table()
        .into_iter()
        .fold(Router::new(), |app, (prefix, group)| app.nest(prefix, group))
        .route("/", get(welcome))
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    let app = if config.dev_mode {
        app.layer(middleware::from_fn(log_requests))
    } else {
        app
    };

    app.layer(CorsLayer::permissive())
        .layer(middleware::from_fn(enforce_parsable_body))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
}

async fn welcome() -> Html<&'static str> {
    Html(WELCOME)
}
