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

const KIND: LookupKind = LookupKind::PaymentMethod;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_payment_methods).post(create_payment_method))
        .route(
            "/{id}",
            get(get_payment_method)
                .put(rename_payment_method)
                .delete(delete_payment_method),
        )
}

#[utoipa::path(
    get,
    path = "/paymentmethod",
    responses(
        (status = 200, description = "All payment methods, sorted by name", body = LookupListResponse),
    ),
    tag = "payment-methods"
)]
pub async fn list_payment_methods(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::list(state, KIND).await
}

#[utoipa::path(
    get,
    path = "/paymentmethod/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment method ID")
    ),
    responses(
        (status = 200, description = "Payment method details", body = LookupResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "payment-methods"
)]
pub async fn get_payment_method(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::get(state, KIND, id).await
}

#[utoipa::path(
    post,
    path = "/paymentmethod",
    request_body = LookupRequest,
    responses(
        (status = 201, description = "Payment method created", body = LookupResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::dto::ErrorResponse),
    ),
    tag = "payment-methods"
)]
pub async fn create_payment_method(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<LookupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::create(state, KIND, body).await
}

#[utoipa::path(
    put,
    path = "/paymentmethod/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment method ID")
    ),
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Payment method renamed", body = LookupResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::dto::ErrorResponse),
    ),
    tag = "payment-methods"
)]
pub async fn rename_payment_method(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    axum::Json(body): axum::Json<LookupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::rename(state, KIND, id, body).await
}

#[utoipa::path(
    delete,
    path = "/paymentmethod/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment method ID")
    ),
    responses(
        (status = 204, description = "Payment method deleted"),
        (status = 400, description = "Payment method still referenced by orders", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "payment-methods"
)]
pub async fn delete_payment_method(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    lookups::delete(state, KIND, id).await
}
