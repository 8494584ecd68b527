use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::models::{NewOrder, Order, OrderItem};
use storefront_core::traits::OrderStore;

use crate::error::classify_sqlx_error;

/// Repository for order persistence in PostgreSQL. Orders and their line
/// items are written in one transaction; items ride along on every read.
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn items_for(&self, order_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<OrderItem>>, AppError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT order_id, product_id, quantity, unit_price_cents
            FROM order_items
            WHERE order_id = ANY($1)
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for row in rows {
            by_order.entry(row.order_id).or_default().push(OrderItem {
                product_id: row.product_id,
                quantity: row.quantity,
                unit_price_cents: row.unit_price_cents,
            });
        }
        Ok(by_order)
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn list(&self) -> Result<Vec<Order>, AppError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, status_id, payment_method_id, payment_status_id,
                   total_cents, created_at, updated_at
            FROM orders
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut items = self.items_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let order_items = items.remove(&row.id).unwrap_or_default();
                row.into_order(order_items)
            })
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, status_id, payment_method_id, payment_status_id,
                   total_cents, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        match row {
            Some(row) => {
                let mut items = self.items_for(&[row.id]).await?;
                let order_items = items.remove(&row.id).unwrap_or_default();
                Ok(Some(row.into_order(order_items)))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, order: NewOrder) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await.map_err(classify_sqlx_error)?;

        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (user_id, status_id, payment_method_id, payment_status_id, total_cents)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, status_id, payment_method_id, payment_status_id,
                      total_cents, created_at, updated_at
            "#,
        )
        .bind(order.user_id)
        .bind(order.status_id)
        .bind(order.payment_method_id)
        .bind(order.payment_status_id)
        .bind(order.total_cents)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify_sqlx_error)?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(row.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .execute(&mut *tx)
            .await
            .map_err(classify_sqlx_error)?;
        }

        tx.commit().await.map_err(classify_sqlx_error)?;

        Ok(row.into_order(order.items))
    }

    async fn update_status(&self, id: Uuid, status_id: Uuid) -> Result<Option<Order>, AppError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders
            SET status_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, status_id, payment_method_id, payment_status_id,
                      total_cents, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        match row {
            Some(row) => {
                let mut items = self.items_for(&[row.id]).await?;
                let order_items = items.remove(&row.id).unwrap_or_default();
                Ok(Some(row.into_order(order_items)))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        // Items go with the order via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

// -- Internal row types for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    status_id: Uuid,
    payment_method_id: Uuid,
    payment_status_id: Uuid,
    total_cents: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: self.id,
            user_id: self.user_id,
            status_id: self.status_id,
            payment_method_id: self.payment_method_id,
            payment_status_id: self.payment_status_id,
            total_cents: self.total_cents,
            items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    unit_price_cents: i64,
}
