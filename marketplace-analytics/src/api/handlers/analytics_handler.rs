// marketplace-analytics/src/api/handlers/analytics_handler.rs

use crate::api::dto::analytics_dto::{
    ActorSummaryResponse, ReferenceDateQuery, SnapshotReceipt, SnapshotRequest, SummaryRequest,
};
use crate::api::dto::booking_query_dto::BookingListQuery;
use crate::api::dto::common::ApiResponse;
use crate::api::AppState;
use crate::domain::analytics_summary::{AgencySummary, DerivedSummary};
use crate::domain::booking_model::Booking;
use crate::error::AppResult;
use crate::extractors::ValidatedJson;
use crate::types::PaginatedResponse;
use axum::{
    extract::{Json, Path, Query, State},
    routing::{get, post, put},
    Router,
};
use serde_json::json;
use tracing::info;

// --- Handler Functions ---

/// その場で集計する（保存しない）
pub async fn compute_summary_handler(
    State(app_state): State<AppState>,
    Query(query): Query<ReferenceDateQuery>,
    ValidatedJson(payload): ValidatedJson<SummaryRequest>,
) -> AppResult<Json<ApiResponse<DerivedSummary>>> {

    let summary = app_state.analytics_service.compute_ad_hoc(
        &payload.bookings,
        &payload.reviews,
        query.reference_date,
    );

    info!(
        bookings = payload.bookings.len(),
        reviews = payload.reviews.len(),
        "Ad-hoc summary computed"
    );

    Ok(Json(ApiResponse::success(
        "Summary computed successfully",
        summary,
    )))
}

/// その場でエージェンシー集計を行う
pub async fn compute_agency_summary_handler(
    State(app_state): State<AppState>,
    Query(query): Query<ReferenceDateQuery>,
    ValidatedJson(payload): ValidatedJson<SummaryRequest>,
) -> AppResult<Json<ApiResponse<AgencySummary>>> {

    let summary = app_state.analytics_service.compute_ad_hoc_agency(
        &payload.bookings,
        &payload.reviews,
        query.reference_date,
    );

    info!(
        bookings = payload.bookings.len(),
        providers = summary.provider_breakdown.len(),
        "Ad-hoc agency summary computed"
    );

    Ok(Json(ApiResponse::success(
        "Agency summary computed successfully",
        summary,
    )))
}

/// ライブ購読からのスナップショットを受け取る
pub async fn put_snapshot_handler(
    State(app_state): State<AppState>,
    Path(actor_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<SnapshotRequest>,
) -> AppResult<Json<ApiResponse<SnapshotReceipt>>> {
    let receipt = app_state
        .analytics_service
        .ingest_snapshot(&actor_id, payload)
        .await?;

    let message = if receipt.replaced {
        "Snapshot replaced"
    } else {
        "Snapshot stored"
    };
    Ok(Json(ApiResponse::success(message, receipt)))
}

pub async fn delete_snapshot_handler(
    State(app_state): State<AppState>,
    Path(actor_id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    app_state
        .analytics_service
        .remove_snapshot(&actor_id)
        .await?;

    Ok(Json(ApiResponse::success_message("Snapshot removed")))
}

pub async fn list_actors_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let actor_ids = app_state.analytics_service.actor_ids().await?;
    Ok(Json(ApiResponse::success(
        "Actors retrieved successfully",
        actor_ids,
    )))
}

/// 保存済みスナップショットから集計を返す
pub async fn get_actor_summary_handler(
    State(app_state): State<AppState>,
    Path(actor_id): Path<String>,
    Query(query): Query<ReferenceDateQuery>,
) -> AppResult<Json<ApiResponse<ActorSummaryResponse>>> {
    let response = app_state
        .analytics_service
        .actor_summary(&actor_id, query.reference_date)
        .await?;

    info!(
        actor_id = %response.actor_id,
        actor_kind = %response.actor_kind,
        reference_date = %response.reference_date,
        "Actor summary computed"
    );

    Ok(Json(ApiResponse::success(
        "Summary retrieved successfully",
        response,
    )))
}

/// プロバイダーとして集計する。エージェンシーのスナップショットなら400
pub async fn get_provider_summary_handler(
    State(app_state): State<AppState>,
    Path(actor_id): Path<String>,
    Query(query): Query<ReferenceDateQuery>,
) -> AppResult<Json<ApiResponse<DerivedSummary>>> {
    let summary = app_state
        .analytics_service
        .provider_summary(&actor_id, query.reference_date)
        .await?;

    Ok(Json(ApiResponse::success(
        "Provider summary retrieved successfully",
        summary,
    )))
}

/// エージェンシーとして集計する。プロバイダーのスナップショットなら400
pub async fn get_agency_summary_handler(
    State(app_state): State<AppState>,
    Path(actor_id): Path<String>,
    Query(query): Query<ReferenceDateQuery>,
) -> AppResult<Json<ApiResponse<AgencySummary>>> {
    let summary = app_state
        .analytics_service
        .agency_summary(&actor_id, query.reference_date)
        .await?;

    Ok(Json(ApiResponse::success(
        "Agency summary retrieved successfully",
        summary,
    )))
}

/// 一覧画面用の予約リスト
pub async fn list_actor_bookings_handler(
    State(app_state): State<AppState>,
    Path(actor_id): Path<String>,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<ApiResponse<PaginatedResponse<Booking>>>> {
    let page = app_state
        .analytics_service
        .list_bookings(&actor_id, &query)
        .await?;

    let metadata = json!({
        "filters": {
            "search": query.search,
            "status": query.status,
            "category": query.category,
            "provider_id": query.provider_id,
        },
        "sort_by": query.sort.sort_by,
        "sort_order": query.sort.sort_order,
    });

    Ok(Json(ApiResponse::success_with_metadata(
        "Bookings retrieved successfully",
        page,
        metadata,
    )))
}

// --- Router Setup ---

pub fn analytics_router(app_state: AppState) -> Router {
    Router::new()
        .route("/analytics/summary", post(compute_summary_handler))
        .route(
            "/analytics/agency-summary",
            post(compute_agency_summary_handler),
        )
        .route("/actors", get(list_actors_handler))
        .route(
            "/actors/{actor_id}/snapshot",
            put(put_snapshot_handler).delete(delete_snapshot_handler),
        )
        .route("/actors/{actor_id}/summary", get(get_actor_summary_handler))
        .route(
            "/actors/{actor_id}/provider-summary",
            get(get_provider_summary_handler),
        )
        .route(
            "/actors/{actor_id}/agency-summary",
            get(get_agency_summary_handler),
        )
        .route(
            "/actors/{actor_id}/bookings",
            get(list_actor_bookings_handler),
        )
        .with_state(app_state)
}
