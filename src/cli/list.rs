//! `taskr list` command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::task::{Priority, Status, Task};

const TABLE_COL_ID: usize = 4;
const TABLE_COL_TITLE: usize = 30;
const TABLE_COL_PRIORITY: usize = 8;
const TABLE_COL_STATUS: usize = 11;
const TABLE_COL_DUE: usize = 10;

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (pending, in_progress, completed, cancelled)
    #[arg(short, long)]
    status: Option<Status>,

    /// Filter by priority (low, medium, high)
    #[arg(short, long)]
    priority: Option<Priority>,

    /// Include completed tasks
    #[arg(long)]
    show_completed: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Path to the tasks file
    #[arg(long)]
    file: Option<PathBuf>,
}

fn print_table_header() {
    println!(
        "{:<width_id$} {:<width_title$} {:<width_priority$} {:<width_status$} DUE",
        "ID",
        "TITLE",
        "PRIORITY",
        "STATUS",
        width_id = TABLE_COL_ID,
        width_title = TABLE_COL_TITLE,
        width_priority = TABLE_COL_PRIORITY,
        width_status = TABLE_COL_STATUS
    );
    println!(
        "{}",
        "-".repeat(
            TABLE_COL_ID + TABLE_COL_TITLE + TABLE_COL_PRIORITY + TABLE_COL_STATUS + TABLE_COL_DUE + 4
        )
    );
}

fn print_table_row(task: &Task) {
    let title = super::truncate(&task.title, TABLE_COL_TITLE);
    let due = match &task.due_date {
        Some(due) if task.is_overdue() => format!("{} !", due.format("%Y-%m-%d")),
        Some(due) => due.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    };
    println!(
        "{:<width_id$} {:<width_title$} {:<width_priority$} {:<width_status$} {}",
        task.id,
        title,
        task.priority.label(),
        task.status.label(),
        due,
        width_id = TABLE_COL_ID,
        width_title = TABLE_COL_TITLE,
        width_priority = TABLE_COL_PRIORITY,
        width_status = TABLE_COL_STATUS
    );
}

pub async fn run(args: ListArgs) -> Result<()> {
    let store = super::open_store(args.file)?;

    let mut tasks: Vec<&Task> = store.get_all();

    if let Some(status) = args.status {
        tasks.retain(|t| t.status == status);
    }
    if let Some(priority) = args.priority {
        tasks.retain(|t| t.priority == priority);
    }

    // Completed tasks stay hidden unless asked for, explicitly or via the
    // status filter
    if !args.show_completed && args.status != Some(Status::Completed) {
        tasks.retain(|t| t.status != Status::Completed);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks found");
        return Ok(());
    }

    print_table_header();
    for task in tasks {
        print_table_row(task);
    }

    Ok(())
}
