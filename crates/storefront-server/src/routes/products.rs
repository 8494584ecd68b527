use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::models::NewProduct;

use crate::dto::{ProductListResponse, ProductRequest, ProductResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn validate(body: ProductRequest) -> Result<NewProduct, ApiError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Name must not be empty".to_string()).into());
    }
    if body.price_cents < 0 {
        return Err(AppError::InvalidInput(format!(
            "Price must not be negative, got {}",
            body.price_cents
        ))
        .into());
    }
    if body.stock < 0 {
        return Err(AppError::InvalidInput(format!(
            "Stock must not be negative, got {}",
            body.stock
        ))
        .into());
    }

    Ok(NewProduct {
        name: name.to_string(),
        description: body.description.unwrap_or_default(),
        price_cents: body.price_cents,
        stock: body.stock,
    })
}

fn product_not_found(id: Uuid) -> axum::response::Response {
    let body = crate::dto::ErrorResponse {
        error: "not_found".to_string(),
        message: format!("Product not found: {id}"),
    };
    (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products, newest first", body = ProductListResponse),
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state.stores.products.list().await?;
    let total = products.len();

    let response = ProductListResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
        total,
    };

    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    match state.stores.products.get(id).await? {
        Some(product) => Ok(axum::Json(ProductResponse::from(product)).into_response()),
        None => Ok(product_not_found(id)),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<ProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state.stores.products.create(validate(body)?).await?;
    Ok((StatusCode::CREATED, axum::Json(ProductResponse::from(product))))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    axum::Json(body): axum::Json<ProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    match state.stores.products.update(id, validate(body)?).await? {
        Some(product) => Ok(axum::Json(ProductResponse::from(product)).into_response()),
        None => Ok(product_not_found(id)),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Product still referenced by orders", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if state.stores.products.delete(id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(product_not_found(id))
    }
}
