//! `taskr health` command implementation

use anyhow::Result;

use crate::sync::HealthStatus;

pub async fn run() -> Result<()> {
    let (engine, _) = super::sync_context()?;
    let report = engine.health_check().await;

    match report.status {
        HealthStatus::Connected => {
            println!("Connected to the remote task service");
            if let Some(documents) = report.documents {
                println!("  Documents: {}", documents);
            }
        }
        HealthStatus::Disconnected => {
            println!("Disconnected from the remote task service");
            if let Some(message) = &report.message {
                println!("  {}", message);
            }
        }
        HealthStatus::Error => {
            println!("Remote task service reported an error");
            if let Some(message) = &report.message {
                println!("  {}", message);
            }
        }
    }

    println!("  Last check: {}", super::format_timestamp(report.last_check));

    Ok(())
}
