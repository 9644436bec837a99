//! CLI command implementations

pub mod add;
pub mod auth;
pub mod complete;
pub mod definition;
pub mod delete;
pub mod health;
pub mod list;
pub mod search;
pub mod show;
pub mod stats;
pub mod sync;
pub mod update;

pub use definition::{Cli, Commands};

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::auth::AuthHandler;
use crate::config::Config;
use crate::sync::{HttpRemoteStore, SyncEngine};
use crate::task::TaskStore;

/// Open the task store, honoring the `--file` override, then the config
/// override, then the default location.
pub fn open_store(file: Option<PathBuf>) -> Result<TaskStore> {
    let config = Config::load()?;
    let path = match file.or(config.storage.path) {
        Some(path) => path,
        None => crate::config::default_tasks_path()?,
    };
    Ok(TaskStore::open(path))
}

/// Build the sync engine and identity from config. No configured remote
/// means a permanently disconnected engine, not an error.
pub fn sync_context() -> Result<(SyncEngine<HttpRemoteStore>, AuthHandler)> {
    let config = Config::load()?;
    let auth = AuthHandler::load()?;

    let engine = match config.remote_url() {
        Some(base_url) => {
            let timeout = Duration::from_secs(config.remote.timeout_secs);
            match HttpRemoteStore::new(&base_url, timeout, auth.access_token()) {
                Ok(remote) => SyncEngine::new(Some(remote)),
                Err(e) => {
                    warn!("Could not build remote client: {}", e);
                    SyncEngine::disconnected()
                }
            }
        }
        None => SyncEngine::disconnected(),
    };

    Ok((engine, auth))
}

/// Push the whole store to the cloud after a local change, when connected.
/// Failures are reported as warnings and never fail the local command.
pub async fn best_effort_push(store: &TaskStore) {
    let (engine, auth) = match sync_context() {
        Ok(pair) => pair,
        Err(e) => {
            warn!("Skipping cloud sync: {}", e);
            return;
        }
    };

    if !engine.is_connected().await {
        return;
    }

    match engine.push_all(&store.export(), &auth.user_id()).await {
        Ok(true) => println!("Task synced to cloud"),
        Ok(false) => {}
        Err(e) => eprintln!("Warning: cloud sync failed: {}", e),
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max <= 3 {
        s.chars().take(max).collect()
    } else {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}
