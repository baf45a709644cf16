//! Tenant inspection commands.

use crate::TenantCommands;
use anyhow::Result;
use clinio_core::ClientConfig;
use clinio_tenant::{resolve, tenant_origin};
use colored::Colorize;

pub fn run(cmd: &TenantCommands, config: &ClientConfig, host: &str, format: &str) -> Result<()> {
    match cmd {
        TenantCommands::Info { hostname } => {
            let hostname = hostname.as_deref().unwrap_or(host);
            let descriptor = resolve(hostname, config.mode, &config.base_domain);

            match format {
                "json" => println!("{}", serde_json::to_string_pretty(&descriptor)?),
                _ => {
                    println!("{}: {}", "Hostname".bold(), descriptor.hostname);
                    println!("{}: {}", "Tenant".bold(), descriptor.tenant_id());
                    println!("{}: {}", "Display name".bold(), descriptor.display_name());
                    println!("{}: {}", "Public".bold(), descriptor.is_public);
                }
            }
        }
        TenantCommands::Url { tenant_id } => {
            println!("{}", tenant_origin(tenant_id, config));
        }
    }
    Ok(())
}
