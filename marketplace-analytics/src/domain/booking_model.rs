// marketplace-analytics/src/domain/booking_model.rs

use super::booking_status::BookingStatus;
use super::lenient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 未分類カテゴリの表示名
pub const UNCATEGORIZED: &str = "Uncategorized";

/// ライブ購読から届く予約レコードのスナップショット
///
/// ドキュメントDB側のキー名（camelCase）をそのまま受け取る。
/// 各項目は壊れていてもデシリアライズを失敗させない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub client_id: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub client_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub provider_id: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub provider_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub service_name: String,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub service_category: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_negative_f64")]
    pub price: f64,
    #[serde(default = "unknown_status")]
    pub status: BookingStatus,
    #[serde(default, deserialize_with = "lenient::optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::optional_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_star_rating")]
    pub rating: Option<u8>,
}

fn unknown_status() -> BookingStatus {
    BookingStatus::Unknown
}

impl Booking {
    /// 集計用のカテゴリ名。未設定なら "Uncategorized"
    pub fn category(&self) -> &str {
        self.service_category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// 集計に使う金額。負数・NaN・無限大は0
    ///
    /// デシリアライズを経ずに組み立てられたレコードも同じ扱いにする。
    pub fn amount(&self) -> f64 {
        if self.price.is_finite() && self.price >= 0.0 {
            self.price
        } else {
            0.0
        }
    }

    /// 売上に計上される金額。完了済み以外は0
    pub fn earned_revenue(&self) -> f64 {
        if self.status.is_completed() {
            self.amount()
        } else {
            0.0
        }
    }

    /// 売上を月に割り当てる日時。完了日時がなければ作成日時
    pub fn revenue_timestamp(&self) -> Option<DateTime<Utc>> {
        self.completed_at.or(self.created_at)
    }

    /// 自由語検索の対象項目に一致するか（大文字小文字を区別しない）
    pub fn matches_search(&self, needle_lowercase: &str) -> bool {
        [
            Some(self.client_name.as_str()),
            Some(self.provider_name.as_str()),
            Some(self.service_name.as_str()),
            self.service_category.as_deref(),
            self.location.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle_lowercase))
    }
}
