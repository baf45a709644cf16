//! Clinio CLI
//!
//! Command-line client for the Clinio platform: connectivity checks, tenant
//! inspection, and session management against a Clinio backend.

mod commands;
mod store;

use clap::{Parser, Subcommand};
use clinio_core::{ChannelSink, ClientConfig, ClientEvent, FixedLocation};
use clinio_sdk::ClinioClient;
use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "clinio",
    version,
    about = "Clinio - multi-tenant clinic administration client",
    long_about = "Command-line client for the Clinio platform.\n\n\
                  Resolves the tenant from a hostname the way the web\n\
                  application does, and talks to the same REST API."
)]
struct Cli {
    /// API endpoint URL (defaults to the configured endpoint for the mode)
    #[arg(short, long, env = "CLINIO_API_URL")]
    api_url: Option<String>,

    /// Hostname standing in for the browser location
    #[arg(long, env = "CLINIO_HOST", default_value = "localhost")]
    host: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API connectivity and the reported tenant/version
    Health,

    /// Tenant resolution helpers
    #[command(subcommand)]
    Tenant(TenantCommands),

    /// Sign in and store the session token
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },

    /// Sign out and clear stored credentials
    Logout,
}

#[derive(Subcommand)]
pub enum TenantCommands {
    /// Show the descriptor resolved from a hostname
    Info {
        /// Hostname to resolve (defaults to --host)
        hostname: Option<String>,
    },
    /// Print the origin serving a tenant
    Url {
        /// Tenant id, e.g. `northside` or `public`
        tenant_id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let result = run(&cli).await;

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            if cli.verbose {
                if let Some(source) = e.chain().nth(1) {
                    eprintln!("{}: {}", "Caused by".yellow(), source);
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = ClientConfig::load()?;

    match &cli.command {
        Commands::Health => {
            let (client, mut events) = build_client(cli, &config)?;
            let result = commands::health::run(&client, &cli.format).await;
            drain_events(&mut events);
            result
        }
        Commands::Tenant(cmd) => commands::tenant::run(cmd, &config, &cli.host, &cli.format),
        Commands::Login { email, password } => {
            let (client, mut events) = build_client(cli, &config)?;
            let result = commands::auth::login(&client, email, password, &cli.format).await;
            drain_events(&mut events);
            result
        }
        Commands::Logout => {
            let (client, mut events) = build_client(cli, &config)?;
            let result = commands::auth::logout(&client).await;
            drain_events(&mut events);
            result
        }
    }
}

fn build_client(
    cli: &Cli,
    config: &ClientConfig,
) -> anyhow::Result<(ClinioClient, tokio::sync::mpsc::UnboundedReceiver<ClientEvent>)> {
    let (sink, events) = ChannelSink::channel();
    let navigator = Arc::new(FixedLocation::new(cli.host.clone(), "/"));
    let store = Arc::new(store::FileCredentialStore::open()?);

    let mut builder = ClinioClient::builder()
        .config(config.clone())
        .navigator(navigator)
        .credential_store(store)
        .event_sink(Arc::new(sink));
    if let Some(api_url) = &cli.api_url {
        builder = builder.base_url(api_url);
    }

    Ok((builder.build()?, events))
}

/// Print any classified events the client published during the command.
fn drain_events(events: &mut tokio::sync::mpsc::UnboundedReceiver<ClientEvent>) {
    while let Ok(event) = events.try_recv() {
        eprintln!("{} {}", "!".yellow().bold(), event.user_message());
    }
}
