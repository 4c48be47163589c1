// marketplace-analytics/src/domain/actor.rs

use super::booking_model::Booking;
use super::review_model::Review;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ダッシュボードを持つアクターの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    #[default]
    Provider,
    Agency,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Agency => "agency",
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ライブ購読が最後に届けた1アクター分の全件データ
///
/// 差分更新はせず、新しいスナップショットが来たら丸ごと置き換える。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorSnapshot {
    pub actor_id: String,
    pub actor_kind: ActorKind,
    pub bookings: Vec<Booking>,
    pub reviews: Vec<Review>,
    pub received_at: DateTime<Utc>,
}

impl ActorSnapshot {
    pub fn new(
        actor_id: impl Into<String>,
        actor_kind: ActorKind,
        bookings: Vec<Booking>,
        reviews: Vec<Review>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            actor_kind,
            bookings,
            reviews,
            received_at,
        }
    }
}
