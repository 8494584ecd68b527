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

const KIND: LookupKind = LookupKind::PaymentStatus;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_payment_statuses).post(create_payment_status))
        .route(
            "/{id}",
            get(get_payment_status)
                .put(rename_payment_status)
                .delete(delete_payment_status),
        )
}

#[utoipa::path(
    get,
    path = "/paymentstatus",
    responses(
        (status = 200, description = "All payment statuses, sorted by name", body = LookupListResponse),
    ),
    tag = "payment-statuses"
)]
pub async fn list_payment_statuses(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::list(state, KIND).await
}

#[utoipa::path(
    get,
    path = "/paymentstatus/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment status ID")
    ),
    responses(
        (status = 200, description = "Payment status details", body = LookupResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "payment-statuses"
)]
pub async fn get_payment_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::get(state, KIND, id).await
}

#[utoipa::path(
    post,
    path = "/paymentstatus",
    request_body = LookupRequest,
    responses(
        (status = 201, description = "Payment status created", body = LookupResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::dto::ErrorResponse),
    ),
    tag = "payment-statuses"
)]
pub async fn create_payment_status(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<LookupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::create(state, KIND, body).await
}

#[utoipa::path(
    put,
    path = "/paymentstatus/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment status ID")
    ),
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Payment status renamed", body = LookupResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::dto::ErrorResponse),
    ),
    tag = "payment-statuses"
)]
pub async fn rename_payment_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    axum::Json(body): axum::Json<LookupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::rename(state, KIND, id, body).await
}

#[utoipa::path(
    delete,
    path = "/paymentstatus/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment status ID")
    ),
    responses(
        (status = 204, description = "Payment status deleted"),
        (status = 400, description = "Payment status still referenced by orders", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "payment-statuses"
)]
pub async fn delete_payment_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::delete(state, KIND, id).await
}
