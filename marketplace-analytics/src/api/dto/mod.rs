// marketplace-analytics/src/api/dto/mod.rs
pub mod analytics_dto;
pub mod booking_query_dto;
pub mod common;
