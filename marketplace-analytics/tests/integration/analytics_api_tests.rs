// tests/integration/analytics_api_tests.rs

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use marketplace_analytics::domain::analytics_summary::{AgencySummary, DerivedSummary};
use marketplace_analytics::error::ErrorResponse;
use marketplace_analytics::ApiResponse;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::common::{app_helper::setup_app, request::*};

fn sample_payload() -> Value {
    json!({
        "bookings": [
            { "id": "bk_1", "providerId": "pr_1", "providerName": "Sparkle Cleaning",
              "serviceCategory": "Cleaning", "price": 500, "status": "Completed",
              "createdAt": "2024-06-02T09:00:00Z" },
            { "id": "bk_2", "providerId": "pr_1", "providerName": "Sparkle Cleaning",
              "serviceCategory": "Cleaning", "price": "300", "status": "Upcoming",
              "createdAt": "2024-06-05T09:00:00Z" },
            { "id": "bk_3", "providerId": "pr_2", "providerName": "FixIt Plumbing",
              "serviceCategory": "Plumbing", "price": 200, "status": "Completed",
              "createdAt": "2024-05-20T09:00:00Z" }
        ],
        "reviews": [
            { "id": "rv_1", "providerId": "pr_1", "rating": 5, "createdAt": "2024-06-03T10:00:00Z" },
            { "id": "rv_2", "providerId": "pr_2", "rating": 4, "createdAt": "2024-05-21T10:00:00Z" }
        ]
    })
}

#[tokio::test]
async fn test_compute_summary_success() {
    let app = setup_app();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/analytics/summary",
            &sample_payload(),
        ))
        .await
        .unwrap();

    let (status, body): (_, ApiResponse<DerivedSummary>) = read_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.success);

    let summary = body.data.unwrap();
    assert_eq!(summary.total_revenue, 700.0);
    assert_eq!(summary.total_count, 3);
    assert_eq!(summary.completed_count, 2);
    assert_eq!(summary.total_reviews, 2);
    assert_eq!(summary.average_rating, 4.5);
    assert_eq!(summary.monthly_data.len(), 12);

    // 基準日は固定クロックの2024年6月
    let june = summary.monthly_data.last().unwrap();
    assert_eq!((june.month.as_str(), june.year), ("Jun", 2024));
    assert_eq!(june.revenue, 500.0);
    assert_eq!(june.bookings, 2);

    // 5月 200 → 6月 500
    assert_eq!(summary.revenue_growth, 150.0);
}

#[tokio::test]
async fn test_compute_summary_with_reference_date() {
    let app = setup_app();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/analytics/summary?reference_date=2024-05-31",
            &sample_payload(),
        ))
        .await
        .unwrap();

    let (status, body): (_, ApiResponse<DerivedSummary>) = read_json(response).await;
    assert_eq!(status, StatusCode::OK);

    let summary = body.data.unwrap();
    let last = summary.monthly_data.last().unwrap();
    assert_eq!((last.month.as_str(), last.year), ("May", 2024));
    assert_eq!(last.revenue, 200.0);
    // 6月分は窓の外だが合計には含まれる
    assert_eq!(summary.total_revenue, 700.0);
}

#[tokio::test]
async fn test_compute_summary_empty_body_fields() {
    let app = setup_app();

    let response = app
        .oneshot(create_json_request("POST", "/analytics/summary", &json!({})))
        .await
        .unwrap();

    let (status, body): (_, ApiResponse<DerivedSummary>) = read_json(response).await;
    assert_eq!(status, StatusCode::OK);

    let summary = body.data.unwrap();
    assert_eq!(summary.total_count, 0);
    assert_eq!(summary.completion_rate, 0.0);
    assert_eq!(summary.rating_distribution.len(), 5);
    assert_eq!(summary.status_breakdown.len(), 9);
    assert!(summary.top_services.is_empty());
}

#[tokio::test]
async fn test_compute_summary_invalid_reference_date() {
    let app = setup_app();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/analytics/summary?reference_date=yesterday",
            &sample_payload(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_compute_summary_rejects_non_array_bookings() {
    let app = setup_app();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/analytics/summary",
            &json!({ "bookings": "not-a-list" }),
        ))
        .await
        .unwrap();

    let (status, body): (_, ErrorResponse) = read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error_type, "bad_request");
}

#[tokio::test]
async fn test_malformed_json_body_returns_error_response() {
    let app = setup_app();

    let request = Request::builder()
        .method("POST")
        .uri("/analytics/summary")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"bookings\": ["))
        .unwrap();
    let (status, body): (_, ErrorResponse) = read_json(app.oneshot(request).await.unwrap()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.success);
    assert_eq!(body.error_type, "bad_request");
    assert!(body.message.starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_compute_summary_rejects_oversized_payload() {
    let app = setup_app();
    let bookings = vec![json!({}); 100_001];

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/analytics/summary",
            &json!({ "bookings": bookings }),
        ))
        .await
        .unwrap();

    let (status, body): (_, ErrorResponse) = read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error_type, "validation_errors");
    assert!(body.validation_errors.unwrap().contains_key("bookings"));
}

#[tokio::test]
async fn test_compute_agency_summary() {
    let app = setup_app();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/analytics/agency-summary",
            &sample_payload(),
        ))
        .await
        .unwrap();

    let (status, body): (_, ApiResponse<AgencySummary>) = read_json(response).await;
    assert_eq!(status, StatusCode::OK);

    let agency = body.data.unwrap();
    assert_eq!(agency.summary.total_revenue, 700.0);
    assert_eq!(agency.provider_breakdown.len(), 2);

    let pr_1 = agency
        .provider_breakdown
        .iter()
        .find(|p| p.provider_id == "pr_1")
        .unwrap();
    assert_eq!(pr_1.provider_name, "Sparkle Cleaning");
    assert_eq!(pr_1.total_bookings, 2);
    assert_eq!(pr_1.completed_bookings, 1);
    assert_eq!(pr_1.revenue, 500.0);
    assert_eq!(pr_1.reviews, 1);
    assert_eq!(pr_1.average_rating, 5.0);
}

#[tokio::test]
async fn test_agency_summary_is_flattened_in_json() {
    let app = setup_app();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/analytics/agency-summary",
            &sample_payload(),
        ))
        .await
        .unwrap();

    let (_, body): (_, Value) = read_json(response).await;
    let data = &body["data"];
    assert!(data.get("total_revenue").is_some());
    assert!(data.get("provider_breakdown").unwrap().is_array());
    assert!(data.get("summary").is_none());
}
