//! `taskr search` command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

const TABLE_COL_ID: usize = 4;
const TABLE_COL_TITLE: usize = 28;
const TABLE_COL_DESC: usize = 34;

#[derive(Args)]
pub struct SearchArgs {
    /// Search query (case-insensitive substring)
    query: String,

    /// Search the remote task service instead of the local store
    #[arg(long)]
    remote: bool,

    /// Path to the tasks file
    #[arg(long)]
    file: Option<PathBuf>,
}

fn print_header() {
    println!(
        "{:<width_id$} {:<width_title$} {:<width_desc$} TAGS",
        "ID",
        "TITLE",
        "DESCRIPTION",
        width_id = TABLE_COL_ID,
        width_title = TABLE_COL_TITLE,
        width_desc = TABLE_COL_DESC
    );
}

fn print_row(id: &str, title: &str, description: &str, tags: &str) {
    println!(
        "{:<width_id$} {:<width_title$} {:<width_desc$} {}",
        id,
        super::truncate(title, TABLE_COL_TITLE),
        super::truncate(description, TABLE_COL_DESC),
        tags,
        width_id = TABLE_COL_ID,
        width_title = TABLE_COL_TITLE,
        width_desc = TABLE_COL_DESC
    );
}

pub async fn run(args: SearchArgs) -> Result<()> {
    if args.remote {
        return run_remote(&args.query).await;
    }

    let store = super::open_store(args.file)?;
    let results = store.search(&args.query);

    if results.is_empty() {
        println!("No tasks found matching '{}'", args.query);
        return Ok(());
    }

    print_header();
    for task in results {
        print_row(
            &task.id,
            &task.title,
            task.description.as_deref().unwrap_or("-"),
            &task.tags.join(", "),
        );
    }

    Ok(())
}

async fn run_remote(query: &str) -> Result<()> {
    let (engine, auth) = super::sync_context()?;

    if !engine.is_connected().await {
        println!("Not connected to the remote task service");
        return Ok(());
    }

    let hits = engine.search_remote(query, &auth.user_id()).await?;

    if hits.is_empty() {
        println!("No cloud tasks found matching '{}'", query);
        return Ok(());
    }

    print_header();
    for hit in hits {
        let tags = hit
            .data
            .get("tags")
            .and_then(|tags| tags.as_array())
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| tag.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        print_row(
            &hit.task_id,
            hit.field("title").unwrap_or("-"),
            hit.field("description").unwrap_or("-"),
            &tags,
        );
    }

    Ok(())
}
