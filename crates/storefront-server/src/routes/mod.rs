//! One module per mounted resource group. Each exposes a `router()` that the
//! application nests under its public prefix.

pub mod auth;
pub mod lookups;
pub mod orders;
pub mod payment_methods;
pub mod payment_statuses;
pub mod permissions;
pub mod products;
pub mod reports;
pub mod statuses;
pub mod users;
