//! Task Reminder - task tracking CLI with cloud synchronization

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use task_reminder::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("TASK_REMINDER_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("task_reminder=debug")
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Completion { shell } => {
            generate(shell, &mut Cli::command(), "taskr", &mut std::io::stdout());
            Ok(())
        }
        Commands::Add(args) => cli::add::run(args).await,
        Commands::List(args) => cli::list::run(args).await,
        Commands::Show(args) => cli::show::run(args).await,
        Commands::Complete(args) => cli::complete::run(args).await,
        Commands::Update(args) => cli::update::run(args).await,
        Commands::Delete(args) => cli::delete::run(args).await,
        Commands::Search(args) => cli::search::run(args).await,
        Commands::Stats(args) => cli::stats::run(args).await,
        Commands::Sync(args) => cli::sync::run(args).await,
        Commands::Health => cli::health::run().await,
        Commands::Auth { command } => cli::auth::run(command).await,
    }
}
