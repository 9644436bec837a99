// Sync error types

use thiserror::Error;

/// Transport-level failure talking to the remote task service.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed remote response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Sync engine failures surfaced to callers. Disconnection is not an error
/// for most operations; these cover work that began while connected.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Not connected to the remote task service")]
    NotConnected,

    #[error("Failed to sync tasks to cloud: {source}")]
    Push { source: RemoteError },

    #[error("Failed to sync tasks from cloud: {source}")]
    Pull { source: RemoteError },

    #[error("Failed to delete task from cloud: {source}")]
    Delete { source: RemoteError },

    #[error("Failed to read cloud statistics: {source}")]
    Statistics { source: RemoteError },

    #[error("Cloud search failed: {source}")]
    Search { source: RemoteError },
}

impl SyncError {
    /// The underlying transport failure, when there is one.
    pub fn remote_cause(&self) -> Option<&RemoteError> {
        match self {
            SyncError::NotConnected => None,
            SyncError::Push { source }
            | SyncError::Pull { source }
            | SyncError::Delete { source }
            | SyncError::Statistics { source }
            | SyncError::Search { source } => Some(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
