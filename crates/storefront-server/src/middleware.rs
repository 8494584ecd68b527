//! Gateway middleware: request body screening and dev-mode request logging.

use std::time::Instant;

use axum::body::Body;
use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::dto::ErrorResponse;

/// Largest request body the gateway accepts, in bytes.
pub const BODY_LIMIT: usize = 100 * 1024;

/// Rejects bodies the declared content type cannot represent before any
/// handler runs. JSON bodies must parse, form bodies must be valid UTF-8,
/// everything else passes through untouched.
pub async fn enforce_parsable_body(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(_) => {
            let body = ErrorResponse {
                error: "payload_too_large".to_string(),
                message: format!("Request body exceeds the {BODY_LIMIT} byte limit"),
            };
            return (StatusCode::PAYLOAD_TOO_LARGE, axum::Json(body)).into_response();
        }
    };

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    if let Err(message) = check_body(content_type, &bytes) {
        let body = ErrorResponse {
            error: "malformed_body".to_string(),
            message,
        };
        return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Logs one line per request with method, path, status, and elapsed time.
/// Only installed in dev mode.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_millis();
    tracing::info!(
        status = response.status().as_u16(),
        elapsed_ms,
        "{method} {path}"
    );

    response
}

/// The media type without parameters such as `charset`.
fn content_type_essence(value: &str) -> &str {
    value.split(';').next().unwrap_or(value).trim()
}

fn check_body(content_type: Option<&str>, bytes: &[u8]) -> Result<(), String> {
    // Empty bodies are always fine; handlers that need one will reject.
    if bytes.is_empty() {
        return Ok(());
    }

    let essence = content_type.map(content_type_essence);
    match essence {
        Some(essence) if essence.eq_ignore_ascii_case("application/json") => {
            match serde_json::from_slice::<serde_json::Value>(bytes) {
                Ok(_) => Ok(()),
                Err(err) => Err(format!("Invalid JSON body: {err}")),
            }
        }
        Some(essence) if essence.eq_ignore_ascii_case("application/x-www-form-urlencoded") => {
            match std::str::from_utf8(bytes) {
                Ok(_) => Ok(()),
                Err(_) => Err("Form body is not valid UTF-8".to_string()),
            }
        }
        _ => Ok(()),
    }
}
