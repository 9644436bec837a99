// Task error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Invalid priority '{0}' (expected: low, medium, high)")]
    InvalidPriority(String),

    #[error("Invalid status '{0}' (expected: pending, in_progress, completed, cancelled)")]
    InvalidStatus(String),

    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("Task data error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TaskError>;
