// marketplace-analytics/src/service/analytics_service.rs

use crate::api::dto::analytics_dto::{
    ActorSummary, ActorSummaryResponse, SnapshotReceipt, SnapshotRequest,
};
use crate::api::dto::booking_query_dto::BookingListQuery;
use crate::domain::actor::{ActorKind, ActorSnapshot};
use crate::domain::analytics_summary::{AgencySummary, DerivedSummary};
use crate::domain::booking_model::Booking;
use crate::domain::review_model::Review;
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::service::booking_query_service::query_bookings;
use crate::service::rollup::{compute_agency_summary, compute_summary};
use crate::service::snapshot_store::SnapshotStore;
use crate::types::PaginatedResponse;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct AnalyticsService {
    store: Arc<dyn SnapshotStore>,
    clock: Clock,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self::with_clock(store, Arc::new(Utc::now))
    }

    /// 時刻を差し替えたサービスを作成（テスト用）
    pub fn with_clock(store: Arc<dyn SnapshotStore>, clock: Clock) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// スナップショットを丸ごと置き換える
    pub async fn ingest_snapshot(
        &self,
        actor_id: &str,
        request: SnapshotRequest,
    ) -> AppResult<SnapshotReceipt> {
        let actor_id = validate_actor_id(actor_id)?;
        let received_at = self.now();
        let bookings = request.bookings.len();
        let reviews = request.reviews.len();

        let snapshot = ActorSnapshot::new(
            actor_id.clone(),
            request.actor_kind,
            request.bookings,
            request.reviews,
            received_at,
        );
        let replaced = self.store.replace(snapshot).await?.is_some();

        log_with_context!(
            tracing::Level::INFO,
            "Snapshot ingested",
            "actor_id" => &actor_id,
            "actor_kind" => request.actor_kind,
            "bookings" => bookings,
            "reviews" => reviews,
            "replaced" => replaced,
        );

        Ok(SnapshotReceipt {
            actor_id,
            actor_kind: request.actor_kind,
            bookings,
            reviews,
            replaced,
            received_at,
        })
    }

    pub async fn remove_snapshot(&self, actor_id: &str) -> AppResult<()> {
        let actor_id = validate_actor_id(actor_id)?;
        if self.store.remove(&actor_id).await? {
            log_with_context!(
                tracing::Level::INFO,
                "Snapshot removed",
                "actor_id" => &actor_id,
            );
            Ok(())
        } else {
            Err(not_found(&actor_id))
        }
    }

    pub async fn actor_ids(&self) -> AppResult<Vec<String>> {
        self.store.actor_ids().await
    }

    /// 保存済みスナップショットからアクター種別に応じた集計を作る
    pub async fn actor_summary(
        &self,
        actor_id: &str,
        reference_date: Option<DateTime<Utc>>,
    ) -> AppResult<ActorSummaryResponse> {
        let snapshot = self.load(actor_id).await?;
        let reference_date = reference_date.unwrap_or_else(|| self.now());

        let summary = match snapshot.actor_kind {
            ActorKind::Provider => ActorSummary::Provider(compute_summary(
                &snapshot.bookings,
                &snapshot.reviews,
                reference_date,
            )),
            ActorKind::Agency => ActorSummary::Agency(compute_agency_summary(
                &snapshot.bookings,
                &snapshot.reviews,
                reference_date,
            )),
        };

        Ok(ActorSummaryResponse {
            actor_id: snapshot.actor_id,
            actor_kind: snapshot.actor_kind,
            reference_date,
            snapshot_received_at: snapshot.received_at,
            summary,
        })
    }

    pub async fn provider_summary(
        &self,
        actor_id: &str,
        reference_date: Option<DateTime<Utc>>,
    ) -> AppResult<DerivedSummary> {
        let snapshot = self.load_kind(actor_id, ActorKind::Provider).await?;
        Ok(compute_summary(
            &snapshot.bookings,
            &snapshot.reviews,
            reference_date.unwrap_or_else(|| self.now()),
        ))
    }

    pub async fn agency_summary(
        &self,
        actor_id: &str,
        reference_date: Option<DateTime<Utc>>,
    ) -> AppResult<AgencySummary> {
        let snapshot = self.load_kind(actor_id, ActorKind::Agency).await?;
        Ok(compute_agency_summary(
            &snapshot.bookings,
            &snapshot.reviews,
            reference_date.unwrap_or_else(|| self.now()),
        ))
    }

    pub async fn list_bookings(
        &self,
        actor_id: &str,
        query: &BookingListQuery,
    ) -> AppResult<PaginatedResponse<Booking>> {
        let snapshot = self.load(actor_id).await?;
        query_bookings(&snapshot.bookings, query)
    }

    /// 保存せずにその場で集計する
    pub fn compute_ad_hoc(
        &self,
        bookings: &[Booking],
        reviews: &[Review],
        reference_date: Option<DateTime<Utc>>,
    ) -> DerivedSummary {
        compute_summary(bookings, reviews, reference_date.unwrap_or_else(|| self.now()))
    }

    pub fn compute_ad_hoc_agency(
        &self,
        bookings: &[Booking],
        reviews: &[Review],
        reference_date: Option<DateTime<Utc>>,
    ) -> AgencySummary {
        compute_agency_summary(bookings, reviews, reference_date.unwrap_or_else(|| self.now()))
    }

    // 保存時と同じ正規化をしてから引く
    async fn load(&self, actor_id: &str) -> AppResult<ActorSnapshot> {
        let actor_id = validate_actor_id(actor_id)?;
        self.store
            .get(&actor_id)
            .await?
            .ok_or_else(|| not_found(&actor_id))
    }

    async fn load_kind(&self, actor_id: &str, expected: ActorKind) -> AppResult<ActorSnapshot> {
        let snapshot = self.load(actor_id).await?;
        if snapshot.actor_kind != expected {
            return Err(AppError::BadRequest(format!(
                "Actor {} is a {}, not a {}",
                actor_id, snapshot.actor_kind, expected
            )));
        }
        Ok(snapshot)
    }
}

fn not_found(actor_id: &str) -> AppError {
    AppError::NotFound(format!("No snapshot for actor {}", actor_id))
}

fn validate_actor_id(actor_id: &str) -> AppResult<String> {
    let trimmed = actor_id.trim();
    if trimmed.is_empty() || trimmed.len() > 128 {
        return Err(AppError::ValidationError(
            "actor_id must be between 1 and 128 characters".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
