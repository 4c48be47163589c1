// marketplace-analytics/src/service/booking_query_service.rs

use crate::api::dto::booking_query_dto::{BookingFilter, BookingListQuery, BookingSortField};
use crate::domain::booking_model::Booking;
use crate::domain::booking_status::BookingStatus;
use crate::error::AppResult;
use crate::types::{PaginatedResponse, SortOrder};
use std::cmp::Ordering;

/// 一覧画面向けに予約を絞り込み・並び替え・ページ分割する
pub fn query_bookings(
    bookings: &[Booking],
    query: &BookingListQuery,
) -> AppResult<PaginatedResponse<Booking>> {
    let filter = query.to_filter()?;

    let mut matched: Vec<&Booking> = bookings
        .iter()
        .filter(|booking| matches_filter(booking, &filter))
        .collect();
    matched.sort_by(|a, b| compare_bookings(a, b, filter.sort_field, filter.sort_order));

    let (page, per_page) = query.pagination.get_pagination();
    let total_count = matched.len() as u64;
    let items = matched
        .into_iter()
        .skip(query.pagination.get_offset())
        .take(per_page as usize)
        .cloned()
        .collect();

    Ok(PaginatedResponse::new(items, page, per_page, total_count))
}

/// 条件はすべてAND。作成日時の範囲は両端を含む
pub fn matches_filter(booking: &Booking, filter: &BookingFilter) -> bool {
    if filter.status.is_some_and(|status| booking.status != status) {
        return false;
    }
    if let Some(category) = &filter.category {
        if booking.category().to_lowercase() != *category {
            return false;
        }
    }
    if let Some(provider_id) = &filter.provider_id {
        if booking.provider_id != *provider_id {
            return false;
        }
    }
    if let Some(search) = &filter.search {
        if !booking.matches_search(search) {
            return false;
        }
    }
    if filter.min_price.is_some_and(|min| booking.amount() < min)
        || filter.max_price.is_some_and(|max| booking.amount() > max)
    {
        return false;
    }
    if filter.created_after.is_some() || filter.created_before.is_some() {
        let Some(created_at) = booking.created_at else {
            return false;
        };
        if filter.created_after.is_some_and(|after| created_at < after)
            || filter.created_before.is_some_and(|before| created_at > before)
        {
            return false;
        }
    }
    true
}

// 作成日時を持たないレコードは並び順に関わらず末尾
fn compare_bookings(
    a: &Booking,
    b: &Booking,
    field: BookingSortField,
    order: SortOrder,
) -> Ordering {
    let ordering = match field {
        BookingSortField::CreatedAt => match (a.created_at, b.created_at) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        BookingSortField::Price => a.amount().total_cmp(&b.amount()),
        BookingSortField::Status => status_rank(a.status).cmp(&status_rank(b.status)),
        BookingSortField::ServiceName => a
            .service_name
            .to_lowercase()
            .cmp(&b.service_name.to_lowercase()),
        BookingSortField::ClientName => a
            .client_name
            .to_lowercase()
            .cmp(&b.client_name.to_lowercase()),
    };

    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn status_rank(status: BookingStatus) -> usize {
    BookingStatus::all()
        .iter()
        .position(|s| *s == status)
        .unwrap_or(usize::MAX)
}
