// marketplace-analytics/src/extractors/mod.rs
pub mod json;

pub use json::ValidatedJson;
