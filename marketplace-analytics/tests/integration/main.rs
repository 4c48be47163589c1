// tests/integration/main.rs

#[path = "../common/mod.rs"]
mod common;

mod analytics_api_tests;
