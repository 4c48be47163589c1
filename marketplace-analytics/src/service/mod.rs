// marketplace-analytics/src/service/mod.rs
pub mod analytics_service;
pub mod booking_query_service;
pub mod rollup;
pub mod snapshot_store;
