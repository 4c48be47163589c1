// marketplace-analytics/src/domain/mod.rs
pub mod actor;
pub mod analytics_summary;
pub mod booking_model;
pub mod booking_status;
pub mod lenient;
pub mod review_model;
