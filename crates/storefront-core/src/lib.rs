pub mod auth;
pub mod error;
pub mod models;
pub mod traits;

pub use error::AppError;
pub use models::{AuthToken, Lookup, LookupKind, Order, OrderItem, Product, User};
pub use traits::{LookupStore, OrderStore, ProductStore, ReportStore, TokenStore, UserStore};
