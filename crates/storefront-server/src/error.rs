use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use storefront_core::error::AppError;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Duplicate { .. } => (StatusCode::CONFLICT, "duplicate"),
            AppError::ForeignKeyViolation(_) => (StatusCode::BAD_REQUEST, "foreign_key_violation"),
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
        };

        // Internal failures are logged in full but never leak details to
        // the client.
        let message = if self.0.is_internal() {
            tracing::error!("{}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}
