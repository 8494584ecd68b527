use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use uuid::Uuid;

use storefront_core::models::LookupKind;

use crate::dto::{LookupListResponse, LookupRequest, LookupResponse};
use crate::error::ApiError;
use crate::routes::lookups;
use crate::state::AppState;

const KIND: LookupKind = LookupKind::Status;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_statuses).post(create_status))
        .route(
            "/{id}",
            get(get_status).put(rename_status).delete(delete_status),
        )
}

#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "All order statuses, sorted by name", body = LookupListResponse),
    ),
    tag = "statuses"
)]
pub async fn list_statuses(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::list(state, KIND).await
}

#[utoipa::path(
    get,
    path = "/status/{id}",
    params(
        ("id" = Uuid, Path, description = "Status ID")
    ),
    responses(
        (status = 200, description = "Status details", body = LookupResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "statuses"
)]
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::get(state, KIND, id).await
}

#[utoipa::path(
    post,
    path = "/status",
    request_body = LookupRequest,
    responses(
        (status = 201, description = "Status created", body = LookupResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::dto::ErrorResponse),
    ),
    tag = "statuses"
)]
pub async fn create_status(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<LookupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::create(state, KIND, body).await
}

#[utoipa::path(
    put,
    path = "/status/{id}",
    params(
        ("id" = Uuid, Path, description = "Status ID")
    ),
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Status renamed", body = LookupResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::dto::ErrorResponse),
    ),
    tag = "statuses"
)]
pub async fn rename_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    axum::Json(body): axum::Json<LookupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::rename(state, KIND, id, body).await
}

#[utoipa::path(
    delete,
    path = "/status/{id}",
    params(
        ("id" = Uuid, Path, description = "Status ID")
    ),
    responses(
        (status = 204, description = "Status deleted"),
        (status = 400, description = "Status still referenced by orders", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "statuses"
)]
pub async fn delete_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::delete(state, KIND, id).await
}
