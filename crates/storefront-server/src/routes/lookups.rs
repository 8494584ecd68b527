//! Shared handler cores for the four id/name lookup tables. The per-table
//! modules stay thin: they pin the [`LookupKind`], declare routes, and carry
//! the OpenAPI annotations.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::models::LookupKind;

use crate::dto::{ErrorResponse, LookupListResponse, LookupRequest, LookupResponse};
use crate::error::ApiError;
use crate::state::AppState;

fn label(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::Permission => "Permission",
        LookupKind::Status => "Status",
        LookupKind::PaymentMethod => "Payment method",
        LookupKind::PaymentStatus => "Payment status",
    }
}

fn not_found(kind: LookupKind, id: Uuid) -> Response {
    let body = ErrorResponse {
        error: "not_found".to_string(),
        message: format!("{} not found: {id}", label(kind)),
    };
    (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
}

fn validated_name(body: &LookupRequest) -> Result<&str, ApiError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Name must not be empty".to_string()).into());
    }
    Ok(name)
}

pub(super) async fn list(state: Arc<AppState>, kind: LookupKind) -> Result<Response, ApiError> {
    let entries = state.stores.lookups.list(kind).await?;
    let total = entries.len();

    let response = LookupListResponse {
        entries: entries.into_iter().map(LookupResponse::from).collect(),
        total,
    };

    Ok(axum::Json(response).into_response())
}

pub(super) async fn get(
    state: Arc<AppState>,
    kind: LookupKind,
    id: Uuid,
) -> Result<Response, ApiError> {
    match state.stores.lookups.get(kind, id).await? {
        Some(row) => Ok(axum::Json(LookupResponse::from(row)).into_response()),
        None => Ok(not_found(kind, id)),
    }
}

pub(super) async fn create(
    state: Arc<AppState>,
    kind: LookupKind,
    body: LookupRequest,
) -> Result<Response, ApiError> {
    let name = validated_name(&body)?;
    let row = state.stores.lookups.create(kind, name).await?;
    Ok((StatusCode::CREATED, axum::Json(LookupResponse::from(row))).into_response())
}

pub(super) async fn rename(
    state: Arc<AppState>,
    kind: LookupKind,
    id: Uuid,
    body: LookupRequest,
) -> Result<Response, ApiError> {
    let name = validated_name(&body)?;
    match state.stores.lookups.rename(kind, id, name).await? {
        Some(row) => Ok(axum::Json(LookupResponse::from(row)).into_response()),
        None => Ok(not_found(kind, id)),
    }
}

pub(super) async fn delete(
    state: Arc<AppState>,
    kind: LookupKind,
    id: Uuid,
) -> Result<Response, ApiError> {
    if state.stores.lookups.delete(kind, id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(not_found(kind, id))
    }
}
