//! Task data model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::TaskError;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Get the text label (matches the wire value)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, TaskError> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TaskError::InvalidPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::InProgress,
        Status::Completed,
        Status::Cancelled,
    ];

    /// Get the text label (matches the wire value)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for Status {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, TaskError> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(TaskError::InvalidStatus(s.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID (decimal string, assigned by the store)
    pub id: String,

    /// Task title
    pub title: String,

    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,

    /// Priority level
    #[serde(default)]
    pub priority: Priority,

    /// Current status
    #[serde(default)]
    pub status: Status,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last modified
    pub updated_at: DateTime<Utc>,

    /// Set once, on the first transition to completed
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    /// Free-form tags, order preserved for display
    #[serde(default)]
    pub tags: Vec<String>,

    /// Due date (if any)
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Create a new pending task with both timestamps set to now
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            priority: Priority::default(),
            status: Status::default(),
            created_at: now,
            updated_at: now,
            completed_at: None,
            tags: Vec::new(),
            due_date: None,
        }
    }

    /// Apply a partial update. Only supplied fields change; `completed_at`
    /// is set on the first transition to completed and never after.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
            if status == Status::Completed && self.completed_at.is_none() {
                self.completed_at = Some(Utc::now());
            }
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        self.updated_at = Utc::now();
    }

    /// Check if the task is past its due date and still open
    pub fn is_overdue(&self) -> bool {
        if let Some(due) = &self.due_date {
            let today = Utc::now().date_naive();
            due < &today && self.status != Status::Completed && self.status != Status::Cancelled
        } else {
            false
        }
    }
}

/// Fields of a task update. `None` means "leave untouched".
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<NaiveDate>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.tags.is_none()
            && self.due_date.is_none()
    }

    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
