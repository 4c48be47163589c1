// marketplace-analytics/src/domain/review_model.rs

use super::lenient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// クライアントが投稿したレビュー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub provider_id: String,
    /// 1..=5。壊れた値は0として平均に含まれる
    #[serde(default, deserialize_with = "lenient::star_rating")]
    pub rating: u8,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub comment: String,
    #[serde(default, deserialize_with = "lenient::optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    /// 集計に使う星評価。1..=5 以外は0
    pub fn stars(&self) -> u8 {
        if (1..=5).contains(&self.rating) {
            self.rating
        } else {
            0
        }
    }
}
