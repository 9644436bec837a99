//! `taskr auth` command implementations

use anyhow::Result;
use clap::Subcommand;

use crate::auth::AuthHandler;

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Save credentials for cloud sync
    Login {
        /// User id that partitions your remote tasks
        #[arg(short, long)]
        user: String,

        /// Bearer token for the remote task service
        #[arg(short, long, env = "TASK_REMINDER_TOKEN")]
        token: Option<String>,
    },

    /// Show the current identity
    Status,

    /// Remove saved credentials
    Logout,
}

pub async fn run(command: AuthCommands) -> Result<()> {
    let mut auth = AuthHandler::load()?;

    match command {
        AuthCommands::Login { user, token } => {
            auth.login(&user, token)?;
            println!("Authenticated as: {}", user);
        }
        AuthCommands::Status => {
            if auth.is_authenticated() {
                println!("Authenticated as: {}", auth.user_id());
            } else {
                println!(
                    "Not authenticated (cloud sync uses the '{}' identity)",
                    auth.user_id()
                );
            }
        }
        AuthCommands::Logout => {
            auth.logout()?;
            println!("Logged out");
        }
    }

    Ok(())
}
