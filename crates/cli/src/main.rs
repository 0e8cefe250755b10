//! dnswatch: command-line consumer for the DNS collector dashboard API.
//!
//! One subcommand per API operation; filter flags are forwarded verbatim
//! as query parameters and the backend owns their interpretation.

mod commands;

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dnswatch_client::{ApiClient, ApiClientConfig};
use tracing_subscriber::EnvFilter;

use crate::commands::domains::DomainsArgs;
use crate::commands::export::{ExportDomainsArgs, ExportStatsArgs};
use crate::commands::stats::StatsArgs;

#[derive(Debug, Parser)]
#[command(name = "dnswatch", version, about = "Query the DNS collector dashboard API")]
struct Cli {
    /// Server origin hosting the web API.
    #[arg(
        long,
        global = true,
        env = "DNSWATCH_BASE_URL",
        default_value = "http://localhost:8080"
    )]
    base_url: String,

    /// Request timeout in seconds.
    #[arg(long, global = true, env = "DNSWATCH_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show aggregate query statistics
    Stats(StatsArgs),
    /// List observed domains
    Domains(DomainsArgs),
    /// Show one domain with its resolved addresses
    Domain {
        /// Domain identifier as reported by the listing
        id: String,
    },
    /// Download the stats export workbook
    ExportStats(ExportStatsArgs),
    /// Download the domains export workbook
    ExportDomains(ExportDomainsArgs),
    /// Check whether the server is up
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let client = ApiClient::new(ApiClientConfig {
        base_url: cli.base_url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
    })
    .context("failed to construct API client")?;

    match cli.command {
        Commands::Stats(args) => commands::stats::run(&client, &args).await,
        Commands::Domains(args) => commands::domains::run(&client, &args).await,
        Commands::Domain { id } => commands::domains::show(&client, &id).await,
        Commands::ExportStats(args) => commands::export::run_stats(&client, &args).await,
        Commands::ExportDomains(args) => commands::export::run_domains(&client, &args).await,
        Commands::Health => commands::health(&client).await,
    }
}
