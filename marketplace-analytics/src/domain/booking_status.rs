// marketplace-analytics/src/domain/booking_status.rs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 予約の状態を表すenum
///
/// ドキュメントDBには表示名そのもの（"In Progress" など）が保存されているため、
/// シリアライズ形式も表示名に合わせる。未知の値は `Unknown` に落とす。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Upcoming,
    InProgress,
    Completed,
    Cancelled,
    PendingVerification,
    PendingPayment,
    PaymentRejected,
    Confirmed,
    Unknown,
}

impl BookingStatus {
    /// 文字列からBookingStatusに変換
    ///
    /// 大文字小文字、空白・アンダースコア・ハイフンの違いは無視する。
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "pending" => Some(Self::Pending),
            "upcoming" => Some(Self::Upcoming),
            "inprogress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            "pendingverification" => Some(Self::PendingVerification),
            "pendingpayment" => Some(Self::PendingPayment),
            "paymentrejected" => Some(Self::PaymentRejected),
            "confirmed" => Some(Self::Confirmed),
            _ => None,
        }
    }

    /// 表示名（DBに保存される値）を取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Upcoming => "Upcoming",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::PendingVerification => "Pending Verification",
            Self::PendingPayment => "Pending Payment",
            Self::PaymentRejected => "Payment Rejected",
            Self::Confirmed => "Confirmed",
            Self::Unknown => "Unknown",
        }
    }

    /// すべての有効なステータスを宣言順で取得（Unknownは含まない）
    pub fn all() -> [Self; 9] {
        [
            Self::Pending,
            Self::Upcoming,
            Self::InProgress,
            Self::Completed,
            Self::Cancelled,
            Self::PendingVerification,
            Self::PendingPayment,
            Self::PaymentRejected,
            Self::Confirmed,
        ]
    }

    /// 売上に計上されるステータスかチェック
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| {
            format!(
                "Invalid booking status: '{}'. Valid statuses are: {}",
                s,
                Self::all()
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

impl Serialize for BookingStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

// 不正な値でレコード全体を落とさないよう、文字列以外や未知の値はUnknownにする
impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .and_then(Self::from_str)
            .unwrap_or(Self::Unknown))
    }
}
