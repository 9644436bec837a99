//! `taskr delete` command implementation

use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID to delete
    id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,

    /// Path to the tasks file
    #[arg(long)]
    file: Option<PathBuf>,
}

pub async fn run(args: DeleteArgs) -> Result<()> {
    if !args.yes {
        print!("Delete task {}? (y/N): ", args.id);
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;
        let response = response.trim().to_lowercase();

        if response != "y" && response != "yes" {
            println!("Cancelled");
            return Ok(());
        }
    }

    let mut store = super::open_store(args.file)?;

    if !store.delete(&args.id)? {
        anyhow::bail!("Task not found: {}", args.id);
    }
    println!("Deleted task {}", args.id);

    // Mirror the delete remotely when connected; local state is already
    // final either way
    let (engine, auth) = super::sync_context()?;
    if engine.is_connected().await {
        match engine.delete_one(&args.id, &auth.user_id()).await {
            Ok(true) => println!("Task deleted from cloud"),
            Ok(false) => {}
            Err(e) => eprintln!("Warning: cloud delete failed: {}", e),
        }
    }

    Ok(())
}
