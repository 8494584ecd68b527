//! In-memory store backing the test harness and local development without
//! a database. Mirrors the constraint behavior of the PostgreSQL schema:
//! unique emails and lookup names, foreign key protection, cascade deletes
//! for tokens and order items.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::models::{
    AuthToken, Lookup, LookupKind, NewAuthToken, NewOrder, NewProduct, NewUser, Order, Product,
    ProductSales, SalesReport, User, UserUpdate,
};
use storefront_core::traits::{
    LookupStore, OrderStore, ProductStore, ReportStore, TokenStore, UserStore,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    products: Vec<Product>,
    orders: Vec<Order>,
    lookups: HashMap<LookupKind, Vec<Lookup>>,
    tokens: Vec<AuthToken>,
}

/// One shared table set behind a mutex. All six store traits are implemented
/// on the same value, so a single instance serves a whole application.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(constraint: &str) -> AppError {
    AppError::Duplicate {
        constraint: constraint.to_string(),
    }
}

fn unique_constraint(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::Permission => "permissions_name_key",
        LookupKind::Status => "statuses_name_key",
        LookupKind::PaymentMethod => "payment_methods_name_key",
        LookupKind::PaymentStatus => "payment_statuses_name_key",
    }
}

impl Tables {
    fn lookup_exists(&self, kind: LookupKind, id: Uuid) -> bool {
        self.lookups
            .get(&kind)
            .is_some_and(|rows| rows.iter().any(|row| row.id == id))
    }

    fn check_permission_ref(&self, permission_id: Option<Uuid>) -> Result<(), AppError> {
        match permission_id {
            Some(id) if !self.lookup_exists(LookupKind::Permission, id) => {
                Err(AppError::ForeignKeyViolation(format!(
                    "users.permission_id references a missing permission: {id}"
                )))
            }
            _ => Ok(()),
        }
    }

    fn check_order_refs(&self, order: &NewOrder) -> Result<(), AppError> {
        if !self.users.iter().any(|u| u.id == order.user_id) {
            return Err(AppError::ForeignKeyViolation(format!(
                "orders.user_id references a missing user: {}",
                order.user_id
            )));
        }
        for (kind, id, column) in [
            (LookupKind::Status, order.status_id, "status_id"),
            (
                LookupKind::PaymentMethod,
                order.payment_method_id,
                "payment_method_id",
            ),
            (
                LookupKind::PaymentStatus,
                order.payment_status_id,
                "payment_status_id",
            ),
        ] {
            if !self.lookup_exists(kind, id) {
                return Err(AppError::ForeignKeyViolation(format!(
                    "orders.{column} references a missing {}: {id}",
                    kind.as_str()
                )));
            }
        }
        for item in &order.items {
            if !self.products.iter().any(|p| p.id == item.product_id) {
                return Err(AppError::ForeignKeyViolation(format!(
                    "order_items.product_id references a missing product: {}",
                    item.product_id
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().rev().cloned().collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(duplicate("users_email_key"));
        }
        tables.check_permission_ref(user.permission_id)?;

        let now = Utc::now();
        let stored = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            permission_id: user.permission_id,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: Uuid, changes: UserUpdate) -> Result<Option<User>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.iter().any(|u| u.id == id) {
            return Ok(None);
        }
        if tables
            .users
            .iter()
            .any(|u| u.id != id && u.email == changes.email)
        {
            return Err(duplicate("users_email_key"));
        }
        tables.check_permission_ref(changes.permission_id)?;

        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .map(|user| {
                user.name = changes.name;
                user.email = changes.email;
                user.permission_id = changes.permission_id;
                user.updated_at = Utc::now();
                user.clone()
            });
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.iter().any(|u| u.id == id) {
            return Ok(false);
        }
        if tables.orders.iter().any(|o| o.user_id == id) {
            return Err(AppError::ForeignKeyViolation(format!(
                "user {id} is still referenced by orders"
            )));
        }
        tables.users.retain(|u| u.id != id);
        // auth_tokens.user_id cascades.
        tables.tokens.retain(|t| t.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Product>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.products.iter().rev().cloned().collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let stored = Product {
            id: Uuid::new_v4(),
            name: product.name,
            description: product.description,
            price_cents: product.price_cents,
            stock: product.stock,
            created_at: now,
            updated_at: now,
        };
        tables.products.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: Uuid, changes: NewProduct) -> Result<Option<Product>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let product = tables.products.iter_mut().find(|p| p.id == id).map(|p| {
            p.name = changes.name;
            p.description = changes.description;
            p.price_cents = changes.price_cents;
            p.stock = changes.stock;
            p.updated_at = Utc::now();
            p.clone()
        });
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.products.iter().any(|p| p.id == id) {
            return Ok(false);
        }
        let referenced = tables
            .orders
            .iter()
            .flat_map(|o| o.items.iter())
            .any(|item| item.product_id == id);
        if referenced {
            return Err(AppError::ForeignKeyViolation(format!(
                "product {id} is still referenced by order items"
            )));
        }
        tables.products.retain(|p| p.id != id);
        Ok(true)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Order>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.orders.iter().rev().cloned().collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn create(&self, order: NewOrder) -> Result<Order, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.check_order_refs(&order)?;

        for (index, item) in order.items.iter().enumerate() {
            let dup = order.items[..index]
                .iter()
                .any(|other| other.product_id == item.product_id);
            if dup {
                return Err(duplicate("order_items_pkey"));
            }
        }

        let now = Utc::now();
        let stored = Order {
            id: Uuid::new_v4(),
            user_id: order.user_id,
            status_id: order.status_id,
            payment_method_id: order.payment_method_id,
            payment_status_id: order.payment_status_id,
            total_cents: order.total_cents,
            items: order.items,
            created_at: now,
            updated_at: now,
        };
        tables.orders.push(stored.clone());
        Ok(stored)
    }

    async fn update_status(&self, id: Uuid, status_id: Uuid) -> Result<Option<Order>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.lookup_exists(LookupKind::Status, status_id) {
            return Err(AppError::ForeignKeyViolation(format!(
                "orders.status_id references a missing status: {status_id}"
            )));
        }
        let order = tables.orders.iter_mut().find(|o| o.id == id).map(|o| {
            o.status_id = status_id;
            o.updated_at = Utc::now();
            o.clone()
        });
        Ok(order)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.orders.len();
        tables.orders.retain(|o| o.id != id);
        Ok(tables.orders.len() < before)
    }
}

#[async_trait]
impl LookupStore for MemoryStore {
    async fn list(&self, kind: LookupKind) -> Result<Vec<Lookup>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut rows = tables.lookups.get(&kind).cloned().unwrap_or_default();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn get(&self, kind: LookupKind, id: Uuid) -> Result<Option<Lookup>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .lookups
            .get(&kind)
            .and_then(|rows| rows.iter().find(|row| row.id == id).cloned()))
    }

    async fn create(&self, kind: LookupKind, name: &str) -> Result<Lookup, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.lookups.entry(kind).or_default();
        if rows.iter().any(|row| row.name == name) {
            return Err(duplicate(unique_constraint(kind)));
        }
        let stored = Lookup {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn rename(
        &self,
        kind: LookupKind,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Lookup>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.lookups.entry(kind).or_default();
        if rows.iter().any(|row| row.id != id && row.name == name) {
            return Err(duplicate(unique_constraint(kind)));
        }
        let row = rows.iter_mut().find(|row| row.id == id).map(|row| {
            row.name = name.to_string();
            row.clone()
        });
        Ok(row)
    }

    async fn delete(&self, kind: LookupKind, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.lookup_exists(kind, id) {
            return Ok(false);
        }
        let in_use = match kind {
            LookupKind::Permission => tables.users.iter().any(|u| u.permission_id == Some(id)),
            LookupKind::Status => tables.orders.iter().any(|o| o.status_id == id),
            LookupKind::PaymentMethod => {
                tables.orders.iter().any(|o| o.payment_method_id == id)
            }
            LookupKind::PaymentStatus => {
                tables.orders.iter().any(|o| o.payment_status_id == id)
            }
        };
        if in_use {
            return Err(AppError::ForeignKeyViolation(format!(
                "{} {id} is still referenced",
                kind.as_str()
            )));
        }
        if let Some(rows) = tables.lookups.get_mut(&kind) {
            rows.retain(|row| row.id != id);
        }
        Ok(true)
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn insert(&self, token: NewAuthToken) -> Result<AuthToken, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.tokens.iter().any(|t| t.token_hash == token.token_hash) {
            return Err(duplicate("auth_tokens_token_hash_key"));
        }
        let stored = AuthToken {
            id: Uuid::new_v4(),
            user_id: token.user_id,
            token_hash: token.token_hash,
            expires_at: token.expires_at,
            created_at: Utc::now(),
        };
        tables.tokens.push(stored.clone());
        Ok(stored)
    }

    async fn find_valid(&self, token_hash: &str) -> Result<Option<AuthToken>, AppError> {
        let tables = self.tables.lock().unwrap();
        let now = Utc::now();
        Ok(tables
            .tokens
            .iter()
            .find(|t| t.token_hash == token_hash && t.expires_at > now)
            .cloned())
    }

    async fn revoke(&self, token_hash: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.tokens.len();
        tables.tokens.retain(|t| t.token_hash != token_hash);
        Ok(tables.tokens.len() < before)
    }
}

fn in_window(at: DateTime<Utc>, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> bool {
    from.is_none_or(|from| at >= from) && to.is_none_or(|to| at <= to)
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn sales(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<SalesReport, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut orders = 0i64;
        let mut revenue_cents = 0i64;
        for order in &tables.orders {
            if in_window(order.created_at, from, to) {
                orders += 1;
                revenue_cents += order.total_cents;
            }
        }
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
        let tables = self.tables.lock().unwrap();
        let mut by_product: HashMap<Uuid, (i64, i64)> = HashMap::new();
        for order in &tables.orders {
            if !in_window(order.created_at, from, to) {
                continue;
            }
            for item in &order.items {
                let entry = by_product.entry(item.product_id).or_default();
                entry.0 += i64::from(item.quantity);
                entry.1 += i64::from(item.quantity) * item.unit_price_cents;
            }
        }

        let mut rows: Vec<ProductSales> = by_product
            .into_iter()
            .map(|(product_id, (units_sold, revenue_cents))| {
                let name = tables
                    .products
                    .iter()
                    .find(|p| p.id == product_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                ProductSales {
                    product_id,
                    name,
                    units_sold,
                    revenue_cents,
                }
            })
            .collect();
        rows.sort_by(|a, b| {
            b.revenue_cents
                .cmp(&a.revenue_cents)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(rows)
    }
}
