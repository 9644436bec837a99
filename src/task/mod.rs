//! Task storage module
//!
//! Local task tracking backed by a JSON document:
//! - Task entity with priority, status, and lifecycle timestamps
//! - Durable CRUD, filtering, search, and statistics
//! - Export/import used by the sync engine

pub mod error;
pub mod model;
pub mod store;

pub use error::TaskError;
pub use model::{Priority, Status, Task, TaskPatch};
pub use store::{TaskStatistics, TaskStore};
