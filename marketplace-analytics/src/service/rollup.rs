// marketplace-analytics/src/service/rollup.rs

//! 予約・レビューのスナップショットからダッシュボード用の集計を作る純粋関数群。
//!
//! I/Oも入力の変更も行わず、同じ入力と基準日時からは常に同じ結果を返す。
//! 呼び出しのたびに全件から作り直し、途中結果は保持しない。

use crate::domain::analytics_summary::{
    growth_percentage, mean, AgencySummary, CategoryBreakdown, DerivedSummary, MonthlyBucket,
    ProviderBreakdown, RatingBucket, ServiceRevenue, StatusCount, MONTHLY_BUCKETS, RATING_BUCKETS,
    TOP_SERVICES_LIMIT,
};
use crate::domain::booking_model::Booking;
use crate::domain::booking_status::BookingStatus;
use crate::domain::review_model::Review;
use chrono::{DateTime, Datelike, Utc};
use std::collections::HashMap;
use tracing::debug;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// プロバイダー単位の集計を計算する
pub fn compute_summary(
    bookings: &[Booking],
    reviews: &[Review],
    reference_date: DateTime<Utc>,
) -> DerivedSummary {
    let window = MonthWindow::ending_at(reference_date);
    let mut months = [MonthAccumulator::default(); MONTHLY_BUCKETS];
    let mut categories = RankedAccumulator::<CategoryAccumulator>::default();
    let mut status_counts = [0u64; 9];

    let mut total_revenue = 0.0;
    let mut completed_count = 0u64;

    for booking in bookings {
        if let Some(slot) = status_slot(booking.status) {
            status_counts[slot] += 1;
        }
        if let Some(i) = booking.created_at.and_then(|at| window.index_of(at)) {
            months[i].bookings += 1;
        }

        let category = categories.entry(booking.category());
        category.total_bookings += 1;

        if booking.status.is_completed() {
            let revenue = booking.earned_revenue();
            completed_count += 1;
            total_revenue += revenue;
            category.completed_bookings += 1;
            category.revenue += revenue;

            if let Some(i) = booking.revenue_timestamp().and_then(|at| window.index_of(at)) {
                months[i].revenue += revenue;
            }
        }
    }

    let mut rating_counts = [0u64; RATING_BUCKETS];
    let mut rating_sum = 0.0;

    for review in reviews {
        let stars = review.stars();
        rating_sum += f64::from(stars);
        if stars > 0 {
            rating_counts[usize::from(stars) - 1] += 1;
        }
        if let Some(i) = review.created_at.and_then(|at| window.index_of(at)) {
            months[i].reviews += 1;
            months[i].rating_sum += f64::from(stars);
        }
    }

    let total_count = bookings.len() as u64;
    let total_reviews = reviews.len() as u64;

    let monthly_data: Vec<MonthlyBucket> = months
        .iter()
        .enumerate()
        .map(|(i, acc)| {
            let (month, year) = window.label(i);
            MonthlyBucket {
                month: month.to_string(),
                year,
                revenue: acc.revenue,
                bookings: acc.bookings,
                reviews: acc.reviews,
                average_rating: mean(acc.rating_sum, acc.reviews),
            }
        })
        .collect();

    let current = &months[MONTHLY_BUCKETS - 1];
    let previous = &months[MONTHLY_BUCKETS - 2];

    let category_breakdown = categories.into_ranked(|c| c.revenue);
    let mut top_services: Vec<ServiceRevenue> = category_breakdown
        .iter()
        .filter(|c| c.completed_bookings > 0)
        .map(|c| ServiceRevenue {
            name: c.name.clone(),
            revenue: c.revenue,
            bookings: c.completed_bookings,
        })
        .collect();
    top_services.truncate(TOP_SERVICES_LIMIT);

    debug!(
        bookings = total_count,
        reviews = total_reviews,
        completed = completed_count,
        "Computed analytics summary"
    );

    DerivedSummary {
        total_revenue,
        total_count,
        completed_count,
        completion_rate: if total_count > 0 {
            completed_count as f64 / total_count as f64 * 100.0
        } else {
            0.0
        },
        average_rating: mean(rating_sum, total_reviews),
        total_reviews,
        monthly_data,
        rating_distribution: rating_counts
            .iter()
            .enumerate()
            .map(|(i, &count)| RatingBucket {
                stars: i as u8 + 1,
                count,
            })
            .collect(),
        top_services,
        category_breakdown: category_breakdown
            .into_iter()
            .map(|c| CategoryBreakdown {
                category: c.name,
                revenue: c.revenue,
                total_bookings: c.total_bookings,
                completed_bookings: c.completed_bookings,
            })
            .collect(),
        status_breakdown: BookingStatus::all()
            .iter()
            .zip(status_counts)
            .map(|(&status, count)| StatusCount { status, count })
            .collect(),
        revenue_growth: growth_percentage(current.revenue, previous.revenue),
        review_growth: growth_percentage(current.reviews as f64, previous.reviews as f64),
        booking_growth: growth_percentage(current.bookings as f64, previous.bookings as f64),
    }
}

/// エージェンシー単位の集計。基本の集計に所属プロバイダーごとの内訳を加える
pub fn compute_agency_summary(
    bookings: &[Booking],
    reviews: &[Review],
    reference_date: DateTime<Utc>,
) -> AgencySummary {
    let summary = compute_summary(bookings, reviews, reference_date);

    let mut providers = RankedAccumulator::<ProviderAccumulator>::default();
    for booking in bookings {
        let provider = providers.entry(&booking.provider_id);
        if provider.display_name.is_empty() {
            provider.display_name.clone_from(&booking.provider_name);
        }
        provider.total_bookings += 1;
        if booking.status.is_completed() {
            provider.completed_bookings += 1;
            provider.revenue += booking.earned_revenue();
        }
    }
    for review in reviews {
        if let Some(provider) = providers.get_mut(&review.provider_id) {
            provider.reviews += 1;
            provider.rating_sum += f64::from(review.stars());
        }
    }

    let provider_breakdown = providers
        .into_ranked(|p| p.revenue)
        .into_iter()
        .map(|p| ProviderBreakdown {
            average_rating: mean(p.rating_sum, p.reviews),
            provider_id: p.name,
            provider_name: p.display_name,
            total_bookings: p.total_bookings,
            completed_bookings: p.completed_bookings,
            revenue: p.revenue,
            reviews: p.reviews,
        })
        .collect();

    AgencySummary {
        summary,
        provider_breakdown,
    }
}

fn status_slot(status: BookingStatus) -> Option<usize> {
    BookingStatus::all().iter().position(|s| *s == status)
}

fn month_key(at: DateTime<Utc>) -> i32 {
    at.year() * 12 + at.month0() as i32
}

/// 基準月で終わる直近12ヶ月の窓
struct MonthWindow {
    start_key: i32,
}

impl MonthWindow {
    fn ending_at(reference_date: DateTime<Utc>) -> Self {
        Self {
            start_key: month_key(reference_date) - (MONTHLY_BUCKETS as i32 - 1),
        }
    }

    fn index_of(&self, at: DateTime<Utc>) -> Option<usize> {
        let offset = month_key(at) - self.start_key;
        (0..MONTHLY_BUCKETS as i32)
            .contains(&offset)
            .then_some(offset as usize)
    }

    fn label(&self, index: usize) -> (&'static str, i32) {
        let key = self.start_key + index as i32;
        (
            MONTH_ABBREVIATIONS[key.rem_euclid(12) as usize],
            key.div_euclid(12),
        )
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct MonthAccumulator {
    revenue: f64,
    bookings: u64,
    reviews: u64,
    rating_sum: f64,
}

#[derive(Debug, Default)]
struct CategoryAccumulator {
    name: String,
    revenue: f64,
    total_bookings: u64,
    completed_bookings: u64,
}

#[derive(Debug, Default)]
struct ProviderAccumulator {
    name: String,
    display_name: String,
    revenue: f64,
    total_bookings: u64,
    completed_bookings: u64,
    reviews: u64,
    rating_sum: f64,
}

trait Named: Default {
    fn with_name(name: &str) -> Self;
}

impl Named for CategoryAccumulator {
    fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl Named for ProviderAccumulator {
    fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// 初出順を保ったままキー単位で集計し、最後に安定ソートで順位付けする
#[derive(Debug)]
struct RankedAccumulator<T> {
    index: HashMap<String, usize>,
    entries: Vec<T>,
}

impl<T> Default for RankedAccumulator<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<T: Named> RankedAccumulator<T> {
    fn entry(&mut self, key: &str) -> &mut T {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.entries.push(T::with_name(key));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot]
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        let slot = *self.index.get(key)?;
        self.entries.get_mut(slot)
    }

    /// 指標の降順。同値は初出順
    fn into_ranked(mut self, metric: impl Fn(&T) -> f64) -> Vec<T> {
        self.entries
            .sort_by(|a, b| metric(b).total_cmp(&metric(a)));
        self.entries
    }
}
