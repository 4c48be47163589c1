// tests/unit/booking_query_tests.rs

use marketplace_analytics::api::dto::booking_query_dto::BookingListQuery;
use marketplace_analytics::domain::booking_model::Booking;
use marketplace_analytics::domain::booking_status::BookingStatus;
use marketplace_analytics::error::AppError;
use marketplace_analytics::service::booking_query_service::query_bookings;
use marketplace_analytics::types::{PaginationQuery, SortOrder, SortQuery};

use crate::common::test_data::*;

fn sample_bookings() -> Vec<Booking> {
    vec![
        Booking {
            id: "bk_1".to_string(),
            client_name: "Aiko Tanaka".to_string(),
            service_name: "Deep Clean".to_string(),
            location: Some("Shibuya".to_string()),
            ..create_booking_at(120.0, BookingStatus::Completed, at(2024, 1, 10))
        },
        Booking {
            id: "bk_2".to_string(),
            client_name: "Ben Carter".to_string(),
            service_name: "Pipe Repair".to_string(),
            service_category: Some("Plumbing".to_string()),
            provider_id: "pr_2".to_string(),
            ..create_booking_at(300.0, BookingStatus::Upcoming, at(2024, 3, 5))
        },
        Booking {
            id: "bk_3".to_string(),
            client_name: "Chloe Dubois".to_string(),
            service_name: "Window Clean".to_string(),
            ..create_booking_at(80.0, BookingStatus::Completed, at(2024, 2, 20))
        },
        Booking {
            id: "bk_4".to_string(),
            client_name: "Daichi Mori".to_string(),
            service_name: "Drain Unblock".to_string(),
            service_category: Some("plumbing".to_string()),
            ..create_booking_at(150.0, BookingStatus::Cancelled, at(2024, 4, 1))
        },
    ]
}

fn ids(bookings: &[Booking]) -> Vec<&str> {
    bookings.iter().map(|b| b.id.as_str()).collect()
}

fn sorted_by(field: &str, order: Option<SortOrder>) -> BookingListQuery {
    BookingListQuery {
        sort: SortQuery {
            sort_by: Some(field.to_string()),
            sort_order: order,
        },
        ..Default::default()
    }
}

#[test]
fn test_default_query_returns_newest_first() {
    let result = query_bookings(&sample_bookings(), &BookingListQuery::default()).unwrap();

    assert_eq!(ids(&result.items), vec!["bk_4", "bk_2", "bk_3", "bk_1"]);
    assert_eq!(result.pagination.total_count, 4);
    assert_eq!(result.pagination.page, 1);
    assert_eq!(result.pagination.total_pages, 1);
}

#[test]
fn test_filter_by_status() {
    let query = BookingListQuery {
        status: Some("Completed".to_string()),
        ..Default::default()
    };
    let result = query_bookings(&sample_bookings(), &query).unwrap();
    assert_eq!(ids(&result.items), vec!["bk_3", "bk_1"]);
}

#[test]
fn test_filter_by_category_is_case_insensitive() {
    let query = BookingListQuery {
        category: Some("PLUMBING".to_string()),
        ..Default::default()
    };
    let result = query_bookings(&sample_bookings(), &query).unwrap();
    assert_eq!(ids(&result.items), vec!["bk_4", "bk_2"]);
}

#[test]
fn test_filters_compose() {
    let query = BookingListQuery {
        search: Some("deep clean".to_string()),
        min_price: Some(100.0),
        ..Default::default()
    };
    let result = query_bookings(&sample_bookings(), &query).unwrap();
    assert_eq!(ids(&result.items), vec!["bk_1"]);

    let query = BookingListQuery {
        provider_id: Some("pr_2".to_string()),
        status: Some("Completed".to_string()),
        ..Default::default()
    };
    let result = query_bookings(&sample_bookings(), &query).unwrap();
    assert!(result.items.is_empty());
    assert_eq!(result.pagination.total_count, 0);
}

#[test]
fn test_search_matches_location_and_client() {
    let query = BookingListQuery {
        search: Some("SHIBUYA".to_string()),
        ..Default::default()
    };
    let result = query_bookings(&sample_bookings(), &query).unwrap();
    assert_eq!(ids(&result.items), vec!["bk_1"]);

    let query = BookingListQuery {
        search: Some("mori".to_string()),
        ..Default::default()
    };
    let result = query_bookings(&sample_bookings(), &query).unwrap();
    assert_eq!(ids(&result.items), vec!["bk_4"]);
}

#[test]
fn test_created_range_is_inclusive() {
    let query = BookingListQuery {
        created_after: Some(at(2024, 2, 20)),
        created_before: Some(at(2024, 3, 5)),
        ..Default::default()
    };
    let result = query_bookings(&sample_bookings(), &query).unwrap();
    assert_eq!(ids(&result.items), vec!["bk_2", "bk_3"]);
}

#[test]
fn test_sort_by_price_both_directions() {
    let asc = query_bookings(&sample_bookings(), &sorted_by("price", None)).unwrap();
    assert_eq!(ids(&asc.items), vec!["bk_3", "bk_1", "bk_4", "bk_2"]);

    let desc = query_bookings(
        &sample_bookings(),
        &sorted_by("price", Some(SortOrder::Desc)),
    )
    .unwrap();
    assert_eq!(ids(&desc.items), vec!["bk_2", "bk_4", "bk_1", "bk_3"]);
}

#[test]
fn test_sort_by_client_name() {
    let result = query_bookings(
        &sample_bookings(),
        &sorted_by("client_name", Some(SortOrder::Desc)),
    )
    .unwrap();
    assert_eq!(ids(&result.items), vec!["bk_4", "bk_3", "bk_2", "bk_1"]);
}

#[test]
fn test_pagination() {
    let query = BookingListQuery {
        pagination: PaginationQuery {
            page: 2,
            per_page: 3,
        },
        ..sorted_by("price", None)
    };
    let result = query_bookings(&sample_bookings(), &query).unwrap();

    assert_eq!(ids(&result.items), vec!["bk_2"]);
    assert_eq!(result.pagination.total_pages, 2);
    assert!(!result.pagination.has_next);
    assert!(result.pagination.has_prev);
}

#[test]
fn test_page_past_end_is_empty() {
    let query = BookingListQuery {
        pagination: PaginationQuery {
            page: 9,
            per_page: 20,
        },
        ..Default::default()
    };
    let result = query_bookings(&sample_bookings(), &query).unwrap();
    assert!(result.items.is_empty());
    assert_eq!(result.pagination.total_count, 4);
}

#[test]
fn test_unknown_sort_field_rejected() {
    let result = query_bookings(&sample_bookings(), &sorted_by("rating", None));
    match result {
        Err(AppError::ValidationErrors(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("Unsupported sort field"));
        }
        other => panic!("expected validation error, got {:?}", other.map(|r| r.items.len())),
    }
}
