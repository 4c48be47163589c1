// src/lib.rs
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use api::dto::common::ApiResponse;
pub use service::rollup::{compute_agency_summary, compute_summary};
