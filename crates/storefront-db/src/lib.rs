pub mod config;
pub mod database;
pub mod error;
pub mod lookup_repository;
pub mod memory;
pub mod order_repository;
pub mod product_repository;
pub mod report_repository;
pub mod stores;
pub mod token_repository;
pub mod user_repository;

pub use config::DatabaseConfig;
pub use database::Database;
pub use memory::MemoryStore;
pub use stores::Stores;
