//! In-memory remote store for tests
//!
//! Behaves like the hosted task service: records keyed by
//! `(task_id, user_id)`, substring search over the task data, status
//! aggregation. Reachability and write failures can be toggled to exercise
//! the engine's disconnected and mid-flight-failure paths. Handles are
//! cheap clones of shared state, so a test can keep one for inspection
//! after moving another into the engine.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::error::RemoteError;
use super::remote::{RemoteInfo, RemoteRecord, RemoteStore, StatusCount};

#[derive(Clone)]
pub struct MemoryRemoteStore {
    inner: Arc<Inner>,
}

struct Inner {
    records: Mutex<BTreeMap<(String, String), RemoteRecord>>,
    reachable: AtomicBool,
    writes_fail: AtomicBool,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                records: Mutex::new(BTreeMap::new()),
                reachable: AtomicBool::new(true),
                writes_fail: AtomicBool::new(false),
            }),
        }
    }

    /// Toggle whether `ping` succeeds.
    pub fn set_reachable(&self, reachable: bool) {
        self.inner.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Make subsequent upserts and deletes fail after a successful ping.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.writes_fail.store(fail, Ordering::SeqCst);
    }

    /// Seed a record directly, bypassing the engine.
    pub fn insert(&self, record: RemoteRecord) {
        let key = (record.task_id.clone(), record.user_id.clone());
        self.inner.records.lock().unwrap().insert(key, record);
    }

    pub fn record_count(&self) -> usize {
        self.inner.records.lock().unwrap().len()
    }

    /// All stored records, for assertions.
    pub fn snapshot(&self) -> Vec<RemoteRecord> {
        self.inner.records.lock().unwrap().values().cloned().collect()
    }

    fn check_writes(&self) -> Result<(), RemoteError> {
        if self.inner.writes_fail.load(Ordering::SeqCst) {
            Err(RemoteError::Other("injected write failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn data_matches(data: &Value, needle: &str) -> bool {
        let contains = |field: &str| {
            data.get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| s.to_lowercase().contains(needle))
        };
        let tag_matches = data
            .get("tags")
            .and_then(Value::as_array)
            .is_some_and(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .any(|tag| tag.to_lowercase().contains(needle))
            });
        contains("title") || contains("description") || tag_matches
    }
}

impl Default for MemoryRemoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteStore for MemoryRemoteStore {
    async fn ping(&self) -> Result<(), RemoteError> {
        if self.inner.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RemoteError::Other("remote unreachable".to_string()))
        }
    }

    async fn upsert(&self, record: &RemoteRecord) -> Result<(), RemoteError> {
        self.check_writes()?;
        self.insert(record.clone());
        Ok(())
    }

    async fn fetch_all(&self, user_id: &str) -> Result<Vec<RemoteRecord>, RemoteError> {
        Ok(self
            .inner
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_one(&self, task_id: &str, user_id: &str) -> Result<u64, RemoteError> {
        self.check_writes()?;
        let key = (task_id.to_string(), user_id.to_string());
        let removed = self.inner.records.lock().unwrap().remove(&key);
        Ok(u64::from(removed.is_some()))
    }

    async fn aggregate_by_status(&self, user_id: &str) -> Result<Vec<StatusCount>, RemoteError> {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for record in self.inner.records.lock().unwrap().values() {
            if record.user_id != user_id {
                continue;
            }
            let status = record
                .data
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            *counts.entry(status).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect())
    }

    async fn search(&self, query: &str, user_id: &str) -> Result<Vec<RemoteRecord>, RemoteError> {
        let needle = query.to_lowercase();
        Ok(self
            .inner
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|record| record.user_id == user_id && Self::data_matches(&record.data, &needle))
            .cloned()
            .collect())
    }

    async fn info(&self) -> Result<RemoteInfo, RemoteError> {
        Ok(RemoteInfo {
            documents: self.record_count() as u64,
        })
    }
}
