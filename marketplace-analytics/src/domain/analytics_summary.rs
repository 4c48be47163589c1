// marketplace-analytics/src/domain/analytics_summary.rs

use super::booking_status::BookingStatus;
use serde::{Deserialize, Serialize};

/// 月次バケット数（直近12ヶ月）
pub const MONTHLY_BUCKETS: usize = 12;
/// 星評価の段階数
pub const RATING_BUCKETS: usize = 5;
/// 上位サービスの最大件数
pub const TOP_SERVICES_LIMIT: usize = 5;

/// ダッシュボード表示用の集計結果
///
/// 固定長の配列は入力が空でも必ず埋まっているため、
/// 描画側で「データなし」と「ゼロ」を区別する必要はない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSummary {
    pub total_revenue: f64,
    pub total_count: u64,
    pub completed_count: u64,
    pub completion_rate: f64,
    pub average_rating: f64,
    pub total_reviews: u64,
    pub monthly_data: Vec<MonthlyBucket>,
    pub rating_distribution: Vec<RatingBucket>,
    pub top_services: Vec<ServiceRevenue>,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub status_breakdown: Vec<StatusCount>,
    pub revenue_growth: f64,
    pub review_growth: f64,
    pub booking_growth: f64,
}

/// 1ヶ月分の集計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// "Jan" などの英語3文字略称
    pub month: String,
    pub year: i32,
    pub revenue: f64,
    pub bookings: u64,
    pub reviews: u64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub stars: u8,
    pub count: u64,
}

/// 売上上位サービス（カテゴリ単位）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRevenue {
    pub name: String,
    pub revenue: f64,
    pub bookings: u64,
}

/// カテゴリ別の内訳。完了済み以外も件数には含む
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub revenue: f64,
    pub total_bookings: u64,
    pub completed_bookings: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: BookingStatus,
    pub count: u64,
}

/// エージェンシー用の集計。所属プロバイダーごとの内訳を加える
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencySummary {
    #[serde(flatten)]
    pub summary: DerivedSummary,
    pub provider_breakdown: Vec<ProviderBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderBreakdown {
    pub provider_id: String,
    pub provider_name: String,
    pub total_bookings: u64,
    pub completed_bookings: u64,
    pub revenue: f64,
    pub reviews: u64,
    pub average_rating: f64,
}

/// 前期比の成長率（%）。前期が0なら0
pub fn growth_percentage(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// 平均値。件数0なら0
pub fn mean(sum: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
