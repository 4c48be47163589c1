// marketplace-analytics/src/api/dto/analytics_dto.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::actor::ActorKind;
use crate::domain::analytics_summary::{AgencySummary, DerivedSummary};
use crate::domain::booking_model::Booking;
use crate::domain::review_model::Review;
use crate::types::optional_timestamp;

// --- Request DTOs ---

/// 集計基準日時の指定（未指定なら現在時刻）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceDateQuery {
    #[serde(default, with = "optional_timestamp")]
    pub reference_date: Option<DateTime<Utc>>,
}

/// その場で集計するためのリクエスト
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SummaryRequest {
    #[serde(default)]
    #[validate(length(max = 100000, message = "Too many bookings in a single request"))]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    #[validate(length(max = 100000, message = "Too many reviews in a single request"))]
    pub reviews: Vec<Review>,
}

/// ライブ購読から届くスナップショット
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SnapshotRequest {
    #[serde(default)]
    pub actor_kind: ActorKind,
    #[serde(default)]
    #[validate(length(max = 100000, message = "Too many bookings in a single snapshot"))]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    #[validate(length(max = 100000, message = "Too many reviews in a single snapshot"))]
    pub reviews: Vec<Review>,
}

// --- Response DTOs ---

/// スナップショット受領結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotReceipt {
    pub actor_id: String,
    pub actor_kind: ActorKind,
    pub bookings: usize,
    pub reviews: usize,
    pub replaced: bool,
    pub received_at: DateTime<Utc>,
}

/// アクター種別に応じた集計結果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActorSummary {
    Agency(AgencySummary),
    Provider(DerivedSummary),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorSummaryResponse {
    pub actor_id: String,
    pub actor_kind: ActorKind,
    pub reference_date: DateTime<Utc>,
    pub snapshot_received_at: DateTime<Utc>,
    pub summary: ActorSummary,
}
