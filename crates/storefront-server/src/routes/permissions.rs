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

const KIND: LookupKind = LookupKind::Permission;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_permissions).post(create_permission))
        .route(
            "/{id}",
            get(get_permission)
                .put(rename_permission)
                .delete(delete_permission),
        )
}

#[utoipa::path(
    get,
    path = "/permissions",
    responses(
        (status = 200, description = "All permissions, sorted by name", body = LookupListResponse),
    ),
    tag = "permissions"
)]
pub async fn list_permissions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::list(state, KIND).await
}

#[utoipa::path(
    get,
    path = "/permissions/{id}",
    params(
        ("id" = Uuid, Path, description = "Permission ID")
    ),
    responses(
        (status = 200, description = "Permission details", body = LookupResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "permissions"
)]
pub async fn get_permission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::get(state, KIND, id).await
}

#[utoipa::path(
    post,
    path = "/permissions",
    request_body = LookupRequest,
    responses(
        (status = 201, description = "Permission created", body = LookupResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::dto::ErrorResponse),
    ),
    tag = "permissions"
)]
pub async fn create_permission(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<LookupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::create(state, KIND, body).await
}

#[utoipa::path(
    put,
    path = "/permissions/{id}",
    params(
        ("id" = Uuid, Path, description = "Permission ID")
    ),
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Permission renamed", body = LookupResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::dto::ErrorResponse),
    ),
    tag = "permissions"
)]
pub async fn rename_permission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    axum::Json(body): axum::Json<LookupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::rename(state, KIND, id, body).await
}

#[utoipa::path(
    delete,
    path = "/permissions/{id}",
    params(
        ("id" = Uuid, Path, description = "Permission ID")
    ),
    responses(
        (status = 204, description = "Permission deleted"),
        (status = 400, description = "Permission still assigned to users", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "permissions"
)]
pub async fn delete_permission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::delete(state, KIND, id).await
}
