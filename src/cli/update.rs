//! `taskr update` command implementation

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use crate::task::{Priority, Status, TaskPatch};

#[derive(Args)]
pub struct UpdateArgs {
    /// Task ID to update
    id: String,

    /// New title
    #[arg(long)]
    title: Option<String>,

    /// New description
    #[arg(long)]
    description: Option<String>,

    /// New priority (low, medium, high)
    #[arg(short, long)]
    priority: Option<Priority>,

    /// New status (pending, in_progress, completed, cancelled)
    #[arg(short, long)]
    status: Option<Status>,

    /// Replacement tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    tags: Option<Vec<String>>,

    /// New due date (YYYY-MM-DD)
    #[arg(long)]
    due: Option<NaiveDate>,

    /// Path to the tasks file
    #[arg(long)]
    file: Option<PathBuf>,
}

pub async fn run(args: UpdateArgs) -> Result<()> {
    let patch = TaskPatch {
        title: args.title,
        description: args.description,
        priority: args.priority,
        status: args.status,
        tags: args.tags,
        due_date: args.due,
    };

    if patch.is_empty() {
        anyhow::bail!("Nothing to update: supply at least one field");
    }

    let mut store = super::open_store(args.file)?;

    match store.update(&args.id, patch)? {
        Some(task) => {
            println!("Updated: {}", task.title);
            super::best_effort_push(&store).await;
            Ok(())
        }
        None => anyhow::bail!("Task not found: {}", args.id),
    }
}
