//! `taskr sync` command implementation
//!
//! The bidirectional policy lives here, not in the engine: push overwrites
//! the remote copy, pull overwrites local entries with matching ids, and
//! `both` runs push then pull as independent halves.

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// Local tasks overwrite the remote copy
    Push,
    /// Remote tasks overwrite matching local ones
    Pull,
    /// Push, then pull, non-atomically
    Both,
}

#[derive(Args)]
pub struct SyncArgs {
    /// Sync direction
    #[arg(short, long, value_enum, default_value = "both")]
    direction: Direction,

    /// Path to the tasks file
    #[arg(long)]
    file: Option<PathBuf>,
}

pub async fn run(args: SyncArgs) -> Result<()> {
    let mut store = super::open_store(args.file)?;
    let (engine, auth) = super::sync_context()?;

    if !engine.is_connected().await {
        println!("Not connected to the remote task service");
        return Ok(());
    }

    let user_id = auth.user_id();

    if matches!(args.direction, Direction::Push | Direction::Both) {
        println!("Syncing local tasks to cloud...");
        // A failed push must not stop the pull half
        match engine.push_all(&store.export(), &user_id).await {
            Ok(true) => println!("Tasks synced to cloud"),
            Ok(false) => println!("Not connected to the remote task service"),
            Err(e) => eprintln!("Cloud sync error: {}", e),
        }
    }

    if matches!(args.direction, Direction::Pull | Direction::Both) {
        println!("Syncing tasks from cloud...");
        match engine.pull_all(&user_id).await {
            Ok(tasks) if tasks.is_empty() => println!("No tasks found in cloud"),
            Ok(tasks) => {
                let count = store.import_many(tasks)?;
                println!("Synced {} tasks from cloud", count);
            }
            Err(e) => eprintln!("Cloud sync error: {}", e),
        }
    }

    Ok(())
}
