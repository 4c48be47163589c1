pub mod datetime;
pub mod pagination;
pub mod query;

pub use datetime::optional_timestamp;
pub use pagination::{PaginatedResponse, PaginationMeta};
pub use query::{PaginationQuery, SortOrder, SortQuery};
