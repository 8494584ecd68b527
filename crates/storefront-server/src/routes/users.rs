use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use uuid::Uuid;

use storefront_core::auth::hash_password;
use storefront_core::error::AppError;
use storefront_core::models::{NewUser, User, UserUpdate};

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// Validates and stores a new account. Shared with `POST /auth/register`.
pub(super) async fn insert_user(
    state: &AppState,
    body: CreateUserRequest,
) -> Result<User, ApiError> {
    let name = body.name.trim();
    let email = body.email.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Name must not be empty".to_string()).into());
    }
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::InvalidInput(format!("Invalid email address: {email}")).into());
    }
    if body.password.is_empty() {
        return Err(AppError::InvalidInput("Password must not be empty".to_string()).into());
    }

    let user = state
        .stores
        .users
        .create(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(&body.password),
            permission_id: body.permission_id,
        })
        .await?;

    Ok(user)
}

pub(super) fn user_not_found(id: Uuid) -> axum::response::Response {
    let body = crate::dto::ErrorResponse {
        error: "not_found".to_string(),
        message: format!("User not found: {id}"),
    };
    (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users, newest first", body = UserListResponse),
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.stores.users.list().await?;
    let total = users.len();

    let response = UserListResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
        total,
    };

    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    match state.stores.users.get(id).await? {
        Some(user) => Ok(axum::Json(UserResponse::from(user)).into_response()),
        None => Ok(user_not_found(id)),
    }
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::dto::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = insert_user(&state, body).await?;
    Ok((StatusCode::CREATED, axum::Json(UserResponse::from(user))))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::dto::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    axum::Json(body): axum::Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = body.name.trim();
    let email = body.email.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Name must not be empty".to_string()).into());
    }
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::InvalidInput(format!("Invalid email address: {email}")).into());
    }

    let changes = UserUpdate {
        name: name.to_string(),
        email: email.to_string(),
        permission_id: body.permission_id,
    };

    match state.stores.users.update(id, changes).await? {
        Some(user) => Ok(axum::Json(UserResponse::from(user)).into_response()),
        None => Ok(user_not_found(id)),
    }
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "User still referenced by orders", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if state.stores.users.delete(id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(user_not_found(id))
    }
}
