//! Store traits: the persistence seams the route groups depend on.
//!
//! Every trait is object-safe so handlers can hold `Arc<dyn Store>` and the
//! test harness can swap PostgreSQL for an in-memory implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    AuthToken, Lookup, LookupKind, NewAuthToken, NewOrder, NewProduct, NewUser, Order, Product,
    ProductSales, SalesReport, User, UserUpdate,
};

/// Persists and retrieves users.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    /// Full replace of name/email/permission. Returns `None` for unknown ids.
    async fn update(&self, id: Uuid, changes: UserUpdate) -> Result<Option<User>, AppError>;

    /// Returns `false` when the id did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

/// Persists and retrieves catalog products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Product>, AppError>;

    async fn create(&self, product: NewProduct) -> Result<Product, AppError>;

    async fn update(&self, id: Uuid, changes: NewProduct) -> Result<Option<Product>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

/// Persists and retrieves orders together with their line items.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Order>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Order>, AppError>;

    /// Inserts the order and all items atomically.
    async fn create(&self, order: NewOrder) -> Result<Order, AppError>;

    async fn update_status(&self, id: Uuid, status_id: Uuid) -> Result<Option<Order>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

/// Persists and retrieves rows of the four id + unique-name tables.
#[async_trait]
pub trait LookupStore: Send + Sync {
    /// All rows of the table, sorted by name.
    async fn list(&self, kind: LookupKind) -> Result<Vec<Lookup>, AppError>;

    async fn get(&self, kind: LookupKind, id: Uuid) -> Result<Option<Lookup>, AppError>;

    async fn create(&self, kind: LookupKind, name: &str) -> Result<Lookup, AppError>;

    async fn rename(
        &self,
        kind: LookupKind,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Lookup>, AppError>;

    async fn delete(&self, kind: LookupKind, id: Uuid) -> Result<bool, AppError>;
}

/// Persists bearer token fingerprints.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn insert(&self, token: NewAuthToken) -> Result<AuthToken, AppError>;

    /// Looks up an unexpired token by fingerprint.
    async fn find_valid(&self, token_hash: &str) -> Result<Option<AuthToken>, AppError>;

    /// Removes a token by fingerprint. Returns `false` when absent.
    async fn revoke(&self, token_hash: &str) -> Result<bool, AppError>;
}

/// Read-only aggregations over orders.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn sales(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<SalesReport, AppError>;

    /// Per-product units sold and revenue, highest revenue first.
    async fn product_sales(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<ProductSales>, AppError>;
}
