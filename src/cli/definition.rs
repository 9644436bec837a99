//! Clap command-line definitions

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use super::{add, auth, complete, delete, list, search, show, stats, sync, update};

#[derive(Parser)]
#[command(name = "taskr", version)]
#[command(about = "Task tracking with local storage and cloud sync")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add(add::AddArgs),

    /// List tasks
    List(list::ListArgs),

    /// Show task details
    Show(show::ShowArgs),

    /// Mark a task as completed
    Complete(complete::CompleteArgs),

    /// Update a task
    Update(update::UpdateArgs),

    /// Delete a task
    Delete(delete::DeleteArgs),

    /// Search tasks by title, description, or tags
    Search(search::SearchArgs),

    /// Show task statistics
    Stats(stats::StatsArgs),

    /// Sync tasks with the remote task service
    Sync(sync::SyncArgs),

    /// Show remote task service health
    Health,

    /// Manage cloud sync credentials
    Auth {
        #[command(subcommand)]
        command: auth::AuthCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
