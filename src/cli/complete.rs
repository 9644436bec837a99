//! `taskr complete` command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct CompleteArgs {
    /// Task ID to complete
    id: String,

    /// Path to the tasks file
    #[arg(long)]
    file: Option<PathBuf>,
}

pub async fn run(args: CompleteArgs) -> Result<()> {
    let mut store = super::open_store(args.file)?;

    match store.complete(&args.id)? {
        Some(task) => {
            println!("Completed: {}", task.title);
            super::best_effort_push(&store).await;
            Ok(())
        }
        None => anyhow::bail!("Task not found: {}", args.id),
    }
}
