//! `taskr stats` command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::sync::SyncError;

#[derive(Args)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Path to the tasks file
    #[arg(long)]
    file: Option<PathBuf>,
}

pub async fn run(args: StatsArgs) -> Result<()> {
    let store = super::open_store(args.file)?;
    let stats = store.statistics();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Task statistics");
    println!("  Total:           {}", stats.total);
    println!("  Completed:       {}", stats.completed);
    println!("  Pending:         {}", stats.pending);
    println!("  Completion rate: {:.1}%", stats.completion_rate);

    println!("\nBy priority:");
    for (priority, count) in &stats.by_priority {
        println!("  {:<12} {}", priority, count);
    }

    println!("\nBy status:");
    for (status, count) in &stats.by_status {
        println!("  {:<12} {}", status, count);
    }

    // Remote aggregation is informational only; being offline is not a
    // failure of the stats command
    let (engine, auth) = super::sync_context()?;
    match engine.statistics(&auth.user_id()).await {
        Ok(cloud_stats) => {
            println!("\nCloud tasks by status:");
            if cloud_stats.is_empty() {
                println!("  (none)");
            }
            for (status, count) in cloud_stats {
                println!("  {:<12} {}", status, count);
            }
        }
        Err(SyncError::NotConnected) => {}
        Err(e) => eprintln!("Warning: {}", e),
    }

    Ok(())
}
