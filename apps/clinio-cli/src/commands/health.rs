//! Connectivity check command.

use anyhow::Result;
use clinio_sdk::ClinioClient;
use colored::Colorize;

pub async fn run(client: &ClinioClient, format: &str) -> Result<()> {
    let status = client.check_connection().await;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&status)?),
        _ => {
            let connected = if status.connected {
                "Connected".green()
            } else {
                "Unreachable".red()
            };
            println!("{}: {}", "Status".bold(), connected);
            println!("{}: {}", "Endpoint".bold(), client.base_url());
            if let Some(tenant) = &status.tenant {
                println!("{}: {}", "Tenant".bold(), tenant);
            }
            if let Some(version) = &status.version {
                println!("{}: {}", "Version".bold(), version);
            }
        }
    }

    if let Some(envelope) = status.error {
        anyhow::bail!("API unreachable: {}", envelope.message);
    }
    Ok(())
}
