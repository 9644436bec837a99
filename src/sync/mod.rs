//! Cloud synchronization module
//!
//! Reconciles the local task store against the remote task service in a
//! requested direction, keyed by user identity. Overwrite-by-identity only;
//! the engine owns no merge logic.

pub mod engine;
pub mod error;
pub mod remote;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use engine::{HealthReport, HealthStatus, RemoteHit, SyncEngine};
pub use error::{RemoteError, SyncError};
pub use remote::{HttpRemoteStore, RemoteInfo, RemoteRecord, RemoteStore, StatusCount};
