//! `taskr show` command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID
    id: String,

    /// Path to the tasks file
    #[arg(long)]
    file: Option<PathBuf>,
}

pub async fn run(args: ShowArgs) -> Result<()> {
    let store = super::open_store(args.file)?;

    let Some(task) = store.get(&args.id) else {
        anyhow::bail!("Task not found: {}", args.id);
    };

    println!("{}: {}", task.id, task.title);
    if let Some(description) = &task.description {
        println!("  Description: {}", description);
    }
    println!("  Priority: {}", task.priority.label());
    println!("  Status: {}", task.status.label());

    if !task.tags.is_empty() {
        println!("  Tags: {}", task.tags.join(", "));
    }

    if let Some(due) = &task.due_date {
        println!(
            "  Due: {}{}",
            due.format("%Y-%m-%d"),
            if task.is_overdue() { " (overdue)" } else { "" }
        );
    }

    println!("  Created: {}", super::format_timestamp(task.created_at));
    println!("  Updated: {}", super::format_timestamp(task.updated_at));
    if let Some(completed_at) = task.completed_at {
        println!("  Completed: {}", super::format_timestamp(completed_at));
    }

    Ok(())
}
