use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::models::{ProductSales, SalesReport};
use storefront_core::traits::ReportStore;

use crate::error::classify_sqlx_error;

/// Read-only aggregations over orders in PostgreSQL.
///
/// `SUM` over `BIGINT` yields `NUMERIC` in Postgres, so every sum is cast
/// back to `BIGINT` before it crosses the wire.
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for ReportRepository {
    async fn sales(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<SalesReport, AppError> {
        let row: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(total_cents), 0)::BIGINT
            FROM orders
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at <= $2)
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        let (orders, revenue_cents) = row;
        let average_order_cents = if orders > 0 { revenue_cents / orders } else { 0 };

        Ok(SalesReport {
            orders,
            revenue_cents,
            average_order_cents,
        })
    }

    async fn product_sales(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<ProductSales>, AppError> {
        let rows = sqlx::query_as::<_, ProductSalesRow>(
            r#"
            SELECT oi.product_id,
                   p.name,
                   SUM(oi.quantity)::BIGINT AS units_sold,
                   SUM(oi.quantity * oi.unit_price_cents)::BIGINT AS revenue_cents
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            JOIN products p ON p.id = oi.product_id
            WHERE ($1::timestamptz IS NULL OR o.created_at >= $1)
              AND ($2::timestamptz IS NULL OR o.created_at <= $2)
            GROUP BY oi.product_id, p.name
            ORDER BY revenue_cents DESC, p.name
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct ProductSalesRow {
    product_id: Uuid,
    name: String,
    units_sold: i64,
    revenue_cents: i64,
}

impl From<ProductSalesRow> for ProductSales {
    fn from(row: ProductSalesRow) -> Self {
        ProductSales {
            product_id: row.product_id,
            name: row.name,
            units_sold: row.units_sold,
            revenue_cents: row.revenue_cents,
        }
    }
}
