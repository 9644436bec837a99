//! Local task store - JSON file persistence
//!
//! Owns the id -> task mapping and the backing document. Every mutating
//! operation rewrites the whole file before returning; the previous version
//! is kept as a `.json.bak` sibling.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use super::error::{Result, TaskError};
use super::model::{Priority, Status, Task, TaskPatch};

pub struct TaskStore {
    path: PathBuf,
    tasks: BTreeMap<String, Task>,
}

impl TaskStore {
    /// Open the store at `path`, loading eagerly. A missing file means an
    /// empty store; a malformed file is logged and reset to empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tasks = match Self::read_document(&path) {
            Ok(tasks) => {
                info!("Loaded {} tasks from {}", tasks.len(), path.display());
                tasks
            }
            Err(e) => {
                error!("Error loading tasks from {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, tasks }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn read_document(path: &Path) -> Result<BTreeMap<String, Task>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Keep the previous version around
        if self.path.exists() {
            let backup_path = self.path.with_extension("json.bak");
            if let Err(e) = fs::copy(&self.path, &backup_path) {
                warn!("Failed to create backup: {}", e);
            }
        }

        let content = serde_json::to_string_pretty(&self.tasks)?;
        if let Err(e) = fs::write(&self.path, content) {
            error!("Error saving tasks to {}: {}", self.path.display(), e);
            return Err(e.into());
        }
        Ok(())
    }

    /// Add a new task. The id is the current task count plus one; ids freed
    /// by deletion can be handed out again.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        priority: Priority,
        tags: Vec<String>,
        due_date: Option<NaiveDate>,
    ) -> Result<Task> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }

        let id = (self.tasks.len() + 1).to_string();
        let mut task = Task::new(id.clone(), title);
        task.description = description;
        task.priority = priority;
        task.tags = tags;
        task.due_date = due_date;

        self.tasks.insert(id, task.clone());
        self.save()?;
        info!("Added task: {}", task.title);
        Ok(task)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// All tasks, ordered by numeric id.
    pub fn get_all(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.values().collect();
        tasks.sort_by_key(|t| t.id.parse::<u64>().unwrap_or(u64::MAX));
        tasks
    }

    pub fn by_status(&self, status: Status) -> Vec<&Task> {
        self.get_all()
            .into_iter()
            .filter(|t| t.status == status)
            .collect()
    }

    pub fn by_priority(&self, priority: Priority) -> Vec<&Task> {
        self.get_all()
            .into_iter()
            .filter(|t| t.priority == priority)
            .collect()
    }

    /// Apply a partial update and persist. Returns `None` when the id is
    /// unknown.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Option<Task>> {
        let Some(task) = self.tasks.get_mut(id) else {
            warn!("Task {} not found", id);
            return Ok(None);
        };

        task.apply(patch);
        let updated = task.clone();
        self.save()?;
        info!("Updated task {}", id);
        Ok(Some(updated))
    }

    pub fn complete(&mut self, id: &str) -> Result<Option<Task>> {
        self.update(id, TaskPatch::status(Status::Completed))
    }

    /// Remove a task and persist. Returns whether it existed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        match self.tasks.remove(id) {
            Some(task) => {
                self.save()?;
                info!("Deleted task: {}", task.title);
                Ok(true)
            }
            None => {
                warn!("Task {} not found for deletion", id);
                Ok(false)
            }
        }
    }

    pub fn statistics(&self) -> TaskStatistics {
        let total = self.tasks.len();

        let mut by_priority = BTreeMap::new();
        for priority in Priority::ALL {
            by_priority.insert(
                priority.label().to_string(),
                self.by_priority(priority).len(),
            );
        }

        let mut by_status = BTreeMap::new();
        for status in Status::ALL {
            by_status.insert(status.label().to_string(), self.by_status(status).len());
        }

        let completed = by_status[Status::Completed.label()];
        let pending = by_status[Status::Pending.label()];
        let completion_rate = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };

        TaskStatistics {
            total,
            completed,
            pending,
            completion_rate,
            by_priority,
            by_status,
        }
    }

    /// Case-insensitive substring search over title, description, and tags.
    pub fn search(&self, query: &str) -> Vec<&Task> {
        let needle = query.to_lowercase();
        self.get_all()
            .into_iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
                    || t.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Full dump for the sync engine.
    pub fn export(&self) -> BTreeMap<String, Task> {
        self.tasks.clone()
    }

    /// Import tasks from the sync engine. Entries that fail to deserialize
    /// are logged and skipped; entries with a matching id replace the local
    /// task wholesale. One persist at the end. Returns the imported count.
    pub fn import_many(&mut self, entries: BTreeMap<String, Value>) -> Result<usize> {
        let mut imported = 0;
        for (id, data) in entries {
            match serde_json::from_value::<Task>(data) {
                Ok(task) => {
                    self.tasks.insert(id, task);
                    imported += 1;
                }
                Err(e) => {
                    error!("Error importing task {}: {}", id, e);
                }
            }
        }

        self.save()?;
        info!("Imported {} tasks from cloud", imported);
        Ok(imported)
    }
}

/// Aggregate counts over the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStatistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Completed tasks as a percentage of all tasks, 0 for an empty store
    pub completion_rate: f64,
    /// Count per priority, every priority present
    pub by_priority: BTreeMap<String, usize>,
    /// Count per status, every status present
    pub by_status: BTreeMap<String, usize>,
}
