use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;

use crate::dto::{
    ProductSalesReportResponse, ProductSalesResponse, ReportWindowQuery, SalesReportResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sales", get(sales_report))
        .route("/products", get(product_sales_report))
}

#[utoipa::path(
    get,
    path = "/report/sales",
    params(ReportWindowQuery),
    responses(
        (status = 200, description = "Order count, revenue, and average order value", body = SalesReportResponse),
    ),
    tag = "reports"
)]
pub async fn sales_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportWindowQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.stores.reports.sales(query.from, query.to).await?;
    Ok(axum::Json(SalesReportResponse::from(report)))
}

#[utoipa::path(
    get,
    path = "/report/products",
    params(ReportWindowQuery),
    responses(
        (status = 200, description = "Per-product sales, highest revenue first", body = ProductSalesReportResponse),
    ),
    tag = "reports"
)]
pub async fn product_sales_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportWindowQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .stores
        .reports
        .product_sales(query.from, query.to)
        .await?;
    let total = rows.len();

    let response = ProductSalesReportResponse {
        products: rows.into_iter().map(ProductSalesResponse::from).collect(),
        total,
    };

    Ok(axum::Json(response))
}
