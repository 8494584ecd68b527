//! Bundle of store handles handed to the HTTP layer. Handlers only see the
//! trait objects, so the PostgreSQL and in-memory backends are
//! interchangeable.

use std::sync::Arc;

use storefront_core::traits::{
    LookupStore, OrderStore, ProductStore, ReportStore, TokenStore, UserStore,
};

use crate::database::Database;
use crate::memory::MemoryStore;

#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub products: Arc<dyn ProductStore>,
    pub orders: Arc<dyn OrderStore>,
    pub lookups: Arc<dyn LookupStore>,
    pub tokens: Arc<dyn TokenStore>,
    pub reports: Arc<dyn ReportStore>,
}

impl Stores {
    /// Stores backed by the shared connection pool.
    pub fn postgres(db: &Database) -> Self {
        Self {
            users: Arc::new(db.user_repo()),
            products: Arc::new(db.product_repo()),
            orders: Arc::new(db.order_repo()),
            lookups: Arc::new(db.lookup_repo()),
            tokens: Arc::new(db.token_repo()),
            reports: Arc::new(db.report_repo()),
        }
    }

    /// Stores backed by one shared [`MemoryStore`] table set.
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            products: store.clone(),
            orders: store.clone(),
            lookups: store.clone(),
            tokens: store.clone(),
            reports: store,
        }
    }
}
