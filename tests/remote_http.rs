//! End-to-end test of the HTTP remote store against a fixture server that
//! fakes the hosted task service.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use task_reminder::sync::{HealthStatus, HttpRemoteStore, RemoteRecord, SyncEngine};
use task_reminder::task::{Priority, TaskStore};

type Records = Arc<Mutex<HashMap<(String, String), RemoteRecord>>>;

#[derive(Deserialize)]
struct UserQuery {
    user_id: String,
}

#[derive(Deserialize)]
struct SearchQuery {
    user_id: String,
    q: String,
}

async fn health(State(records): State<Records>) -> Json<Value> {
    let documents = records.lock().unwrap().len();
    Json(json!({"status": "ok", "documents": documents}))
}

async fn upsert(
    State(records): State<Records>,
    Path(task_id): Path<String>,
    Query(query): Query<UserQuery>,
    Json(record): Json<RemoteRecord>,
) -> Json<Value> {
    records
        .lock()
        .unwrap()
        .insert((task_id, query.user_id), record);
    Json(json!({"ok": true}))
}

async fn list(
    State(records): State<Records>,
    Query(query): Query<UserQuery>,
) -> Json<Vec<RemoteRecord>> {
    let records = records.lock().unwrap();
    Json(
        records
            .values()
            .filter(|record| record.user_id == query.user_id)
            .cloned()
            .collect(),
    )
}

async fn remove(
    State(records): State<Records>,
    Path(task_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Json<Value> {
    let removed = records
        .lock()
        .unwrap()
        .remove(&(task_id, query.user_id))
        .is_some();
    Json(json!({"deleted": u64::from(removed)}))
}

async fn stats(State(records): State<Records>, Query(query): Query<UserQuery>) -> Json<Value> {
    let records = records.lock().unwrap();
    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in records.values().filter(|r| r.user_id == query.user_id) {
        let status = record
            .data
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        *counts.entry(status).or_default() += 1;
    }
    let buckets: Vec<Value> = counts
        .into_iter()
        .map(|(status, count)| json!({"status": status, "count": count}))
        .collect();
    Json(Value::Array(buckets))
}

async fn search(
    State(records): State<Records>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<RemoteRecord>> {
    let needle = query.q.to_lowercase();
    let records = records.lock().unwrap();
    Json(
        records
            .values()
            .filter(|record| {
                record.user_id == query.user_id
                    && record
                        .data
                        .get("title")
                        .and_then(Value::as_str)
                        .is_some_and(|title| title.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect(),
    )
}

async fn spawn_fixture() -> SocketAddr {
    let records: Records = Arc::new(Mutex::new(HashMap::new()));
    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/tasks", get(list))
        .route("/api/tasks/stats", get(stats))
        .route("/api/tasks/search", get(search))
        .route("/api/tasks/{task_id}", axum::routing::put(upsert).delete(remove))
        .with_state(records);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn http_remote_end_to_end() {
    let addr = spawn_fixture().await;
    let remote = HttpRemoteStore::new(
        format!("http://{}", addr),
        Duration::from_secs(5),
        Some("fixture-token"),
    )
    .unwrap();
    let engine = SyncEngine::new(Some(remote));

    assert!(engine.is_connected().await);

    let dir = tempfile::tempdir().unwrap();
    let mut store = TaskStore::open(dir.path().join("tasks.json"));
    store
        .add(
            "Ship release",
            None,
            Priority::High,
            vec!["work".to_string()],
            None,
        )
        .unwrap();
    store
        .add("Write notes", None, Priority::default(), Vec::new(), None)
        .unwrap();
    store.complete("2").unwrap();

    assert!(engine.push_all(&store.export(), "u1").await.unwrap());

    let pulled = engine.pull_all("u1").await.unwrap();
    assert_eq!(pulled.len(), 2);
    assert_eq!(pulled["1"]["title"], "Ship release");

    let stats = engine.statistics("u1").await.unwrap();
    assert_eq!(stats.get("pending"), Some(&1));
    assert_eq!(stats.get("completed"), Some(&1));

    let hits = engine.search_remote("ship", "u1").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].task_id, "1");

    assert!(engine.delete_one("1", "u1").await.unwrap());
    assert!(!engine.delete_one("1", "u1").await.unwrap());

    let report = engine.health_check().await;
    assert_eq!(report.status, HealthStatus::Connected);
    assert_eq!(report.documents, Some(1));
}

#[tokio::test]
async fn http_remote_unreachable_is_disconnected() {
    // Nothing listens on port 9; every operation degrades to its no-op form
    let remote = HttpRemoteStore::new("http://127.0.0.1:9", Duration::from_secs(1), None).unwrap();
    let engine = SyncEngine::new(Some(remote));

    assert!(!engine.is_connected().await);
    assert!(!engine
        .push_all(&std::collections::BTreeMap::new(), "u1")
        .await
        .unwrap());
    assert!(engine.pull_all("u1").await.unwrap().is_empty());

    let report = engine.health_check().await;
    assert_eq!(report.status, HealthStatus::Disconnected);
}
