use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::models::{NewOrder, OrderItem};

use crate::dto::{
    CreateOrderRequest, OrderListResponse, OrderResponse, UpdateOrderStatusRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order).delete(delete_order))
        .route("/{id}/status", put(update_order_status))
}

fn order_not_found(id: Uuid) -> axum::response::Response {
    let body = crate::dto::ErrorResponse {
        error: "not_found".to_string(),
        message: format!("Order not found: {id}"),
    };
    (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
}

#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders, newest first", body = OrderListResponse),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state.stores.orders.list().await?;
    let total = orders.len();

    let response = OrderListResponse {
        orders: orders.into_iter().map(OrderResponse::from).collect(),
        total,
    };

    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with its items", body = OrderResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    match state.stores.orders.get(id).await? {
        Some(order) => Ok(axum::Json(OrderResponse::from(order)).into_response()),
        None => Ok(order_not_found(id)),
    }
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.items.is_empty() {
        return Err(
            AppError::InvalidInput("Order must contain at least one item".to_string()).into(),
        );
    }
    for item in &body.items {
        if item.quantity < 1 {
            return Err(AppError::InvalidInput(format!(
                "Invalid quantity {} for product {}",
                item.quantity, item.product_id
            ))
            .into());
        }
    }

    // Price every line at the current catalog price and compute the total
    // server-side.
    let mut total_cents = 0i64;
    let mut items = Vec::with_capacity(body.items.len());
    for item in &body.items {
        let product = state
            .stores
            .products
            .get(item.product_id)
            .await?
            .ok_or_else(|| {
                ApiError::from(AppError::ForeignKeyViolation(format!(
                    "Product not found: {}",
                    item.product_id
                )))
            })?;

        total_cents += product.price_cents * i64::from(item.quantity);
        items.push(OrderItem {
            product_id: product.id,
            quantity: item.quantity,
            unit_price_cents: product.price_cents,
        });
    }

    let order = state
        .stores
        .orders
        .create(NewOrder {
            user_id: body.user_id,
            status_id: body.status_id,
            payment_method_id: body.payment_method_id,
            payment_status_id: body.payment_status_id,
            total_cents,
            items,
        })
        .await?;

    Ok((StatusCode::CREATED, axum::Json(OrderResponse::from(order))))
}

#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated", body = OrderResponse),
        (status = 400, description = "Unknown status", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    axum::Json(body): axum::Json<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    match state.stores.orders.update_status(id, body.status_id).await? {
        Some(order) => Ok(axum::Json(OrderResponse::from(order)).into_response()),
        None => Ok(order_not_found(id)),
    }
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order and its items deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if state.stores.orders.delete(id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(order_not_found(id))
    }
}
