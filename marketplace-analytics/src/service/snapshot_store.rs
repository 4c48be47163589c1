// marketplace-analytics/src/service/snapshot_store.rs

use crate::domain::actor::ActorSnapshot;
use crate::error::AppResult;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// ライブ購読から届いたスナップショットの保管先
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// 既存のスナップショットを丸ごと置き換える。置き換え前のものを返す
    async fn replace(&self, snapshot: ActorSnapshot) -> AppResult<Option<ActorSnapshot>>;

    async fn get(&self, actor_id: &str) -> AppResult<Option<ActorSnapshot>>;

    async fn remove(&self, actor_id: &str) -> AppResult<bool>;

    async fn actor_ids(&self) -> AppResult<Vec<String>>;
}

#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    snapshots: RwLock<HashMap<String, ActorSnapshot>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn replace(&self, snapshot: ActorSnapshot) -> AppResult<Option<ActorSnapshot>> {
        let mut snapshots = self.snapshots.write().await;
        Ok(snapshots.insert(snapshot.actor_id.clone(), snapshot))
    }

    // ロックを保持したまま集計しないよう、複製して返す
    async fn get(&self, actor_id: &str) -> AppResult<Option<ActorSnapshot>> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots.get(actor_id).cloned())
    }

    async fn remove(&self, actor_id: &str) -> AppResult<bool> {
        let mut snapshots = self.snapshots.write().await;
        Ok(snapshots.remove(actor_id).is_some())
    }

    async fn actor_ids(&self) -> AppResult<Vec<String>> {
        let snapshots = self.snapshots.read().await;
        let mut ids: Vec<String> = snapshots.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
