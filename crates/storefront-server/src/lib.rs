//! REST API gateway — configuration, middleware, routes, DTOs, and OpenAPI
//! documentation.

pub mod app;
pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
