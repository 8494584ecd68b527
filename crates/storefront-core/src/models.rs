use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered account. `password_hash` holds the salted digest produced by
/// [`crate::auth::hash_password`] and must never reach a client.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub permission_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for inserting a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub permission_id: Option<Uuid>,
}

/// Full-replace update for a user. The password is changed through the auth
/// flow, not here.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub permission_id: Option<Uuid>,
}

/// A catalog product. Prices are integer cents.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for inserting or fully replacing a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub stock: i32,
}

/// One row of an id + unique name table. Serves permissions, order statuses,
/// payment methods, and payment statuses.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Lookup {
    pub id: Uuid,
    pub name: String,
}

/// Which lookup table a [`crate::traits::LookupStore`] call addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Permission,
    Status,
    PaymentMethod,
    PaymentStatus,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::Permission => "permission",
            LookupKind::Status => "status",
            LookupKind::PaymentMethod => "payment method",
            LookupKind::PaymentStatus => "payment status",
        }
    }
}

/// A placed order with its line items. `total_cents` is computed once at
/// creation from the captured unit prices.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status_id: Uuid,
    pub payment_method_id: Uuid,
    pub payment_status_id: Uuid,
    pub total_cents: i64,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item. `unit_price_cents` is the product price at order time.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

/// DTO for inserting a new order together with its items.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub status_id: Uuid,
    pub payment_method_id: Uuid,
    pub payment_status_id: Uuid,
    pub total_cents: i64,
    pub items: Vec<OrderItem>,
}

/// A stored bearer credential. Only the SHA-256 fingerprint of the token is
/// kept; the plaintext exists once, in the login response.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// DTO for inserting a new auth token.
#[derive(Debug, Clone)]
pub struct NewAuthToken {
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Aggregate figures over all orders in a time window.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SalesReport {
    pub orders: i64,
    pub revenue_cents: i64,
    pub average_order_cents: i64,
}

/// Units sold and revenue for one product in a time window.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProductSales {
    pub product_id: Uuid,
    pub name: String,
    pub units_sold: i64,
    pub revenue_cents: i64,
}
