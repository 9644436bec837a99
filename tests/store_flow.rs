//! End-to-end flows through the task store's public API

use task_reminder::task::{Priority, Status, TaskPatch, TaskStore};

fn store_in(dir: &tempfile::TempDir) -> TaskStore {
    TaskStore::open(dir.path().join("tasks.json"))
}

#[test]
fn add_then_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);

    store
        .add("Buy milk", None, Priority::High, Vec::new(), None)
        .unwrap();

    let task = store.get("1").expect("task 1 exists");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.status, Status::Pending);
}

#[test]
fn complete_one_of_three_updates_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);

    for title in ["One", "Two", "Three"] {
        store
            .add(title, None, Priority::default(), Vec::new(), None)
            .unwrap();
    }
    store.complete("1").unwrap();

    let stats = store.statistics();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.pending, 2);
    assert!((stats.completion_rate - 33.333).abs() < 0.01);
}

#[test]
fn full_lifecycle_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    {
        let mut store = TaskStore::open(&path);
        store
            .add(
                "Plan trip",
                Some("Book flights and hotel".to_string()),
                Priority::High,
                vec!["travel".to_string()],
                None,
            )
            .unwrap();
        store
            .add("Pack bags", None, Priority::Low, Vec::new(), None)
            .unwrap();
        store
            .update("2", TaskPatch::status(Status::InProgress))
            .unwrap();
        store.complete("1").unwrap();
        store.delete("2").unwrap();
    }

    let store = TaskStore::open(&path);
    assert_eq!(store.len(), 1);
    let task = store.get("1").unwrap();
    assert_eq!(task.status, Status::Completed);
    assert!(task.completed_at.is_some());
    assert_eq!(store.search("flights").len(), 1);
}
