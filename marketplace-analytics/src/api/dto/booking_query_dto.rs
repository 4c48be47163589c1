use crate::domain::booking_status::BookingStatus;
use crate::error::{AppError, AppResult};
use crate::types::query::deserialize_optional_f64_from_string;
use crate::types::{optional_timestamp, PaginationQuery, SortOrder, SortQuery};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 予約一覧の検索クエリ
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BookingListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(flatten)]
    pub sort: SortQuery,
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub provider_id: Option<String>,
    #[serde(default, with = "optional_timestamp")]
    pub created_after: Option<DateTime<Utc>>,
    #[serde(default, with = "optional_timestamp")]
    pub created_before: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_f64_from_string")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64_from_string")]
    pub max_price: Option<f64>,
}

/// 並び替え可能な項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingSortField {
    CreatedAt,
    Price,
    Status,
    ServiceName,
    ClientName,
}

impl BookingSortField {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "created_at" => Some(Self::CreatedAt),
            "price" => Some(Self::Price),
            "status" => Some(Self::Status),
            "service_name" => Some(Self::ServiceName),
            "client_name" => Some(Self::ClientName),
            _ => None,
        }
    }
}

/// 検証済みの検索条件
#[derive(Debug, Clone, PartialEq)]
pub struct BookingFilter {
    pub search: Option<String>,
    pub status: Option<BookingStatus>,
    pub category: Option<String>,
    pub provider_id: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_field: BookingSortField,
    pub sort_order: SortOrder,
}

impl BookingListQuery {
    /// 許可されたソートフィールド
    pub fn allowed_sort_fields() -> &'static [&'static str] {
        &[
            "created_at",
            "price",
            "status",
            "service_name",
            "client_name",
        ]
    }

    /// クエリを検証し、フィルタ条件に変換する
    ///
    /// ソート項目未指定時は新しい順。項目指定時の既定は昇順。
    pub fn to_filter(&self) -> AppResult<BookingFilter> {
        let mut errors = Vec::new();

        let status = match non_blank(&self.status) {
            Some(raw) => match BookingStatus::from_str(&raw) {
                Some(status) => Some(status),
                None => {
                    errors.push(format!("status: Unknown booking status '{}'", raw));
                    None
                }
            },
            None => None,
        };

        let (sort_field, default_order) = match non_blank(&self.sort.sort_by) {
            Some(raw) => match BookingSortField::from_str(&raw) {
                Some(field) => (field, SortOrder::Asc),
                None => {
                    errors.push(format!(
                        "sort_by: Unsupported sort field '{}'. Allowed: {}",
                        raw,
                        Self::allowed_sort_fields().join(", ")
                    ));
                    (BookingSortField::CreatedAt, SortOrder::Desc)
                }
            },
            None => (BookingSortField::CreatedAt, SortOrder::Desc),
        };

        for (field, value) in [("min_price", self.min_price), ("max_price", self.max_price)] {
            if value.is_some_and(|v| v < 0.0 || !v.is_finite()) {
                errors.push(format!("{}: Must be a non-negative number", field));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                errors.push("min_price: Must not exceed max_price".to_string());
            }
        }
        if let (Some(after), Some(before)) = (self.created_after, self.created_before) {
            if after > before {
                errors.push("created_after: Must not be later than created_before".to_string());
            }
        }

        if !errors.is_empty() {
            return Err(AppError::ValidationErrors(errors));
        }

        Ok(BookingFilter {
            search: non_blank(&self.search).map(|s| s.to_lowercase()),
            status,
            category: non_blank(&self.category).map(|s| s.to_lowercase()),
            provider_id: non_blank(&self.provider_id),
            created_after: self.created_after,
            created_before: self.created_before,
            min_price: self.min_price,
            max_price: self.max_price,
            sort_field,
            sort_order: self.sort.sort_order.unwrap_or(default_order),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
