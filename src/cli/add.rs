//! `taskr add` command implementation

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use crate::task::Priority;

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    title: String,

    /// Task description
    #[arg(short, long)]
    description: Option<String>,

    /// Priority (low, medium, high)
    #[arg(short, long, default_value = "medium")]
    priority: Priority,

    /// Tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due: Option<NaiveDate>,

    /// Path to the tasks file
    #[arg(long)]
    file: Option<PathBuf>,
}

pub async fn run(args: AddArgs) -> Result<()> {
    let mut store = super::open_store(args.file)?;

    let task = store.add(
        args.title,
        args.description,
        args.priority,
        args.tags,
        args.due,
    )?;

    println!("Created task {}: {}", task.id, task.title);

    super::best_effort_push(&store).await;

    Ok(())
}
