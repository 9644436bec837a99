//! Sync engine - moves task data between the local store and the remote
//! task service, scoped by user identity.
//!
//! There is no conflict resolution here: each direction overwrites by
//! identity, and no timestamps are compared. Whichever direction ran most
//! recently wins.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::error::{Result, SyncError};
use super::remote::{RemoteRecord, RemoteStore};
use crate::task::Task;

/// A remote search hit: the record's task data merged with its id.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteHit {
    pub task_id: String,
    #[serde(flatten)]
    pub data: Value,
}

impl RemoteHit {
    /// Convenience accessor into the merged task data.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.data.get(name).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Connected,
    Disconnected,
    Error,
}

/// Result of the liveness probe. Never an error; problems land in `message`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<u64>,
    pub last_check: DateTime<Utc>,
}

pub struct SyncEngine<R> {
    remote: Option<R>,
}

impl<R: RemoteStore> SyncEngine<R> {
    pub fn new(remote: Option<R>) -> Self {
        Self { remote }
    }

    /// An engine with no remote configured. Every operation degrades to its
    /// disconnected no-op behavior.
    pub fn disconnected() -> Self {
        Self { remote: None }
    }

    pub async fn is_connected(&self) -> bool {
        match &self.remote {
            Some(remote) => remote.ping().await.is_ok(),
            None => false,
        }
    }

    async fn connected(&self) -> Option<&R> {
        match &self.remote {
            Some(remote) if remote.ping().await.is_ok() => Some(remote),
            _ => None,
        }
    }

    /// Upsert every task under `(task_id, user_id)`, stamping `synced_at`.
    /// Returns `Ok(false)` without touching the remote when disconnected.
    pub async fn push_all(&self, tasks: &BTreeMap<String, Task>, user_id: &str) -> Result<bool> {
        let Some(remote) = self.connected().await else {
            warn!("Not connected to the remote task service, skipping push");
            return Ok(false);
        };

        for (task_id, task) in tasks {
            let data = serde_json::to_value(task)
                .map_err(|e| SyncError::Push { source: e.into() })?;
            let record = RemoteRecord {
                task_id: task_id.clone(),
                user_id: user_id.to_string(),
                data,
                synced_at: Utc::now(),
            };
            remote
                .upsert(&record)
                .await
                .map_err(|source| SyncError::Push { source })?;
        }

        info!("Synced {} tasks to cloud", tasks.len());
        Ok(true)
    }

    /// Fetch every record for `user_id` and re-key the task data by task id.
    /// Returns an empty mapping when disconnected, indistinguishable from a
    /// user with no remote tasks.
    pub async fn pull_all(&self, user_id: &str) -> Result<BTreeMap<String, Value>> {
        let Some(remote) = self.connected().await else {
            warn!("Not connected to the remote task service, skipping pull");
            return Ok(BTreeMap::new());
        };

        let records = remote
            .fetch_all(user_id)
            .await
            .map_err(|source| SyncError::Pull { source })?;

        let tasks: BTreeMap<String, Value> = records
            .into_iter()
            .map(|record| (record.task_id, record.data))
            .collect();

        info!("Synced {} tasks from cloud", tasks.len());
        Ok(tasks)
    }

    /// Delete one remote record. True only if exactly one record was removed.
    pub async fn delete_one(&self, task_id: &str, user_id: &str) -> Result<bool> {
        let Some(remote) = self.connected().await else {
            warn!("Not connected to the remote task service, skipping delete");
            return Ok(false);
        };

        let removed = remote
            .delete_one(task_id, user_id)
            .await
            .map_err(|source| SyncError::Delete { source })?;

        if removed == 1 {
            info!("Deleted task {} from cloud", task_id);
        } else {
            warn!("Task {} not found in cloud", task_id);
        }
        Ok(removed == 1)
    }

    /// Remote-side aggregation grouping by task status.
    pub async fn statistics(&self, user_id: &str) -> Result<BTreeMap<String, u64>> {
        let Some(remote) = self.connected().await else {
            return Err(SyncError::NotConnected);
        };

        let buckets = remote
            .aggregate_by_status(user_id)
            .await
            .map_err(|source| SyncError::Statistics { source })?;

        Ok(buckets
            .into_iter()
            .map(|bucket| (bucket.status, bucket.count))
            .collect())
    }

    /// Remote full-text search scoped to the user.
    pub async fn search_remote(&self, query: &str, user_id: &str) -> Result<Vec<RemoteHit>> {
        let Some(remote) = self.connected().await else {
            warn!("Not connected to the remote task service, skipping search");
            return Ok(Vec::new());
        };

        let records = remote
            .search(query, user_id)
            .await
            .map_err(|source| SyncError::Search { source })?;

        Ok(records
            .into_iter()
            .map(|record| RemoteHit {
                task_id: record.task_id,
                data: record.data,
            })
            .collect())
    }

    /// Liveness probe, distinct from the data operations. Never errors.
    pub async fn health_check(&self) -> HealthReport {
        let last_check = Utc::now();

        let Some(remote) = &self.remote else {
            return HealthReport {
                status: HealthStatus::Disconnected,
                message: Some("No remote task service configured".to_string()),
                documents: None,
                last_check,
            };
        };

        if let Err(e) = remote.ping().await {
            return HealthReport {
                status: HealthStatus::Disconnected,
                message: Some(e.to_string()),
                documents: None,
                last_check,
            };
        }

        match remote.info().await {
            Ok(info) => HealthReport {
                status: HealthStatus::Connected,
                message: None,
                documents: Some(info.documents),
                last_check,
            },
            Err(e) => HealthReport {
                status: HealthStatus::Error,
                message: Some(e.to_string()),
                documents: None,
                last_check,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::testing::MemoryRemoteStore;
    use crate::task::{Priority, Status, Task, TaskPatch};

    fn sample_tasks() -> BTreeMap<String, Task> {
        let mut tasks = BTreeMap::new();
        let mut one = Task::new("1", "Pay rent");
        one.priority = Priority::High;
        let mut two = Task::new("2", "Water plants");
        two.apply(TaskPatch::status(Status::Completed));
        tasks.insert("1".to_string(), one);
        tasks.insert("2".to_string(), two);
        tasks
    }

    #[tokio::test]
    async fn test_push_then_pull_round_trip() {
        let engine = SyncEngine::new(Some(MemoryRemoteStore::new()));

        assert!(engine.push_all(&sample_tasks(), "u1").await.unwrap());

        let pulled = engine.pull_all("u1").await.unwrap();
        assert_eq!(pulled.len(), 2);
        assert_eq!(pulled["1"]["title"], "Pay rent");
        assert_eq!(pulled["2"]["status"], "completed");
    }

    #[tokio::test]
    async fn test_push_stamps_synced_at() {
        let remote = MemoryRemoteStore::new();
        let engine = SyncEngine::new(Some(remote.clone()));

        let before = Utc::now();
        engine.push_all(&sample_tasks(), "u1").await.unwrap();

        let records = remote.snapshot();
        assert_eq!(records.len(), 2);
        for record in records {
            assert_eq!(record.user_id, "u1");
            assert!(record.synced_at >= before);
        }
    }

    #[tokio::test]
    async fn test_push_partitions_by_user() {
        let engine = SyncEngine::new(Some(MemoryRemoteStore::new()));

        engine.push_all(&sample_tasks(), "u1").await.unwrap();

        assert!(engine.pull_all("u2").await.unwrap().is_empty());
        assert_eq!(engine.pull_all("u1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_disconnected_push_and_pull_are_noops() {
        let engine: SyncEngine<MemoryRemoteStore> = SyncEngine::disconnected();

        assert!(!engine.push_all(&sample_tasks(), "u1").await.unwrap());
        assert!(engine.pull_all("u1").await.unwrap().is_empty());
        assert!(!engine.is_connected().await);
    }

    #[tokio::test]
    async fn test_unreachable_remote_behaves_like_disconnected() {
        let remote = MemoryRemoteStore::new();
        remote.set_reachable(false);
        let engine = SyncEngine::new(Some(remote));

        assert!(!engine.is_connected().await);
        assert!(!engine.push_all(&sample_tasks(), "u1").await.unwrap());
        assert!(engine.pull_all("u1").await.unwrap().is_empty());
        assert!(!engine.delete_one("1", "u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_push_failure_while_connected_is_wrapped() {
        let remote = MemoryRemoteStore::new();
        remote.fail_writes(true);
        let engine = SyncEngine::new(Some(remote));

        let err = engine.push_all(&sample_tasks(), "u1").await.unwrap_err();
        assert!(matches!(err, SyncError::Push { .. }));
        assert!(err.remote_cause().is_some());
    }

    #[tokio::test]
    async fn test_delete_one_true_only_when_removed() {
        let engine = SyncEngine::new(Some(MemoryRemoteStore::new()));
        engine.push_all(&sample_tasks(), "u1").await.unwrap();

        assert!(engine.delete_one("1", "u1").await.unwrap());
        assert!(!engine.delete_one("1", "u1").await.unwrap());
        assert!(!engine.delete_one("1", "u2").await.unwrap());
    }

    #[tokio::test]
    async fn test_statistics_groups_by_status() {
        let engine = SyncEngine::new(Some(MemoryRemoteStore::new()));
        engine.push_all(&sample_tasks(), "u1").await.unwrap();

        let stats = engine.statistics("u1").await.unwrap();
        assert_eq!(stats.get("pending"), Some(&1));
        assert_eq!(stats.get("completed"), Some(&1));
    }

    #[tokio::test]
    async fn test_statistics_disconnected_is_an_error() {
        let engine: SyncEngine<MemoryRemoteStore> = SyncEngine::disconnected();
        let err = engine.statistics("u1").await.unwrap_err();
        assert!(matches!(err, SyncError::NotConnected));
    }

    #[tokio::test]
    async fn test_search_remote_merges_task_id() {
        let engine = SyncEngine::new(Some(MemoryRemoteStore::new()));
        engine.push_all(&sample_tasks(), "u1").await.unwrap();

        let hits = engine.search_remote("rent", "u1").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].task_id, "1");
        assert_eq!(hits[0].field("title"), Some("Pay rent"));

        assert!(engine.search_remote("rent", "u2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health_check_states() {
        let engine: SyncEngine<MemoryRemoteStore> = SyncEngine::disconnected();
        let report = engine.health_check().await;
        assert_eq!(report.status, HealthStatus::Disconnected);

        let remote = MemoryRemoteStore::new();
        remote.set_reachable(false);
        let engine = SyncEngine::new(Some(remote));
        let report = engine.health_check().await;
        assert_eq!(report.status, HealthStatus::Disconnected);
        assert!(report.message.is_some());

        let engine = SyncEngine::new(Some(MemoryRemoteStore::new()));
        engine.push_all(&sample_tasks(), "u1").await.unwrap();
        let report = engine.health_check().await;
        assert_eq!(report.status, HealthStatus::Connected);
        assert_eq!(report.documents, Some(2));
    }
}
