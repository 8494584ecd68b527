use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use chrono::{Duration, Utc};

use storefront_core::auth::{generate_token, token_fingerprint, verify_password};
use storefront_core::error::AppError;
use storefront_core::models::NewAuthToken;

use crate::dto::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse};
use crate::error::ApiError;
use crate::routes::users;
use crate::state::AppState;

/// How long a login token stays valid.
const TOKEN_TTL_HOURS: i64 = 24;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::from(AppError::Unauthorized))
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = users::insert_user(&state, body).await?;
    Ok((StatusCode::CREATED, axum::Json(UserResponse::from(user))))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.stores.users.get_by_email(&body.email).await?;

    // Same response for unknown email and wrong password.
    let user = match user {
        Some(user) if verify_password(&body.password, &user.password_hash) => user,
        _ => return Err(AppError::Unauthorized.into()),
    };

    let token = generate_token();
    let expires_at = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
    state
        .stores
        .tokens
        .insert(NewAuthToken {
            user_id: user.id,
            token_hash: token_fingerprint(&token),
            expires_at,
        })
        .await?;

    let response = LoginResponse {
        token,
        expires_at,
        user: UserResponse::from(user),
    };

    Ok(axum::Json(response))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Token revoked"),
        (status = 401, description = "Missing bearer token", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = extract_bearer(&headers)?;
    // Revoking an already-revoked token is a no-op, not an error.
    state.stores.tokens.revoke(&token_fingerprint(token)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Account behind the presented token", body = UserResponse),
        (status = 401, description = "Missing, expired, or revoked token", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = extract_bearer(&headers)?;
    let record = state
        .stores
        .tokens
        .find_valid(&token_fingerprint(token))
        .await?
        .ok_or_else(|| ApiError::from(AppError::Unauthorized))?;

    let user = state
        .stores
        .users
        .get(record.user_id)
        .await?
        .ok_or_else(|| ApiError::from(AppError::Unauthorized))?;

    Ok(axum::Json(UserResponse::from(user)))
}
