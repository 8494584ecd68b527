pub mod api_tests;
pub mod common;
pub mod gateway_tests;
