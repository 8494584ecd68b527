use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use storefront_core::AppError;

use crate::config::DatabaseConfig;
use crate::lookup_repository::LookupRepository;
use crate::order_repository::OrderRepository;
use crate::product_repository::ProductRepository;
use crate::report_repository::ReportRepository;
use crate::token_repository::TokenRepository;
use crate::user_repository::UserRepository;

/// Central database facade. Owns the connection pool, runs migrations,
/// and vends repository instances.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {e}")))?;

        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Migration failed: {e}")))?;
        Ok(())
    }

    pub fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn product_repo(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn order_repo(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    pub fn lookup_repo(&self) -> LookupRepository {
        LookupRepository::new(self.pool.clone())
    }

    pub fn token_repo(&self) -> TokenRepository {
        TokenRepository::new(self.pool.clone())
    }

    pub fn report_repo(&self) -> ReportRepository {
        ReportRepository::new(self.pool.clone())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
