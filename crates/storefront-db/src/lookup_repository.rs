use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::models::{Lookup, LookupKind};
use storefront_core::traits::LookupStore;

use crate::error::classify_sqlx_error;

/// Repository for the four id + unique-name tables. One instance serves all
/// of them; the addressed table comes from the [`LookupKind`] argument.
#[derive(Clone)]
pub struct LookupRepository {
    pool: PgPool,
}

/// Table names are fixed at compile time, so interpolating them into the
/// SQL text is safe.
fn table(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::Permission => "permissions",
        LookupKind::Status => "statuses",
        LookupKind::PaymentMethod => "payment_methods",
        LookupKind::PaymentStatus => "payment_statuses",
    }
}

impl LookupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LookupStore for LookupRepository {
    async fn list(&self, kind: LookupKind) -> Result<Vec<Lookup>, AppError> {
        let sql = format!("SELECT id, name FROM {} ORDER BY name", table(kind));
        let rows = sqlx::query_as::<_, LookupRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, kind: LookupKind, id: Uuid) -> Result<Option<Lookup>, AppError> {
        let sql = format!("SELECT id, name FROM {} WHERE id = $1", table(kind));
        let row = sqlx::query_as::<_, LookupRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, kind: LookupKind, name: &str) -> Result<Lookup, AppError> {
        let sql = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING id, name",
            table(kind)
        );
        let row = sqlx::query_as::<_, LookupRow>(&sql)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;

        Ok(row.into())
    }

    async fn rename(
        &self,
        kind: LookupKind,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Lookup>, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $2 WHERE id = $1 RETURNING id, name",
            table(kind)
        );
        let row = sqlx::query_as::<_, LookupRow>(&sql)
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, kind: LookupKind, id: Uuid) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", table(kind));
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct LookupRow {
    id: Uuid,
    name: String,
}

impl From<LookupRow> for Lookup {
    fn from(row: LookupRow) -> Self {
        Lookup {
            id: row.id,
            name: row.name,
        }
    }
}
