//! `dnswatch export-stats` / `export-domains`: download export workbooks.
//!
//! The payload is an opaque byte stream on this side; it is written to
//! disk exactly as received. Default file names follow the server's
//! download naming, `dns-stats-YYYY-MM-DD.xlsx`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytes::Bytes;
use chrono::Local;
use clap::Args;
use dnswatch_client::ApiClient;
use tracing::debug;

use super::domains::DomainsArgs;
use super::stats::StatsArgs;

/// Arguments for `export-stats`.
#[derive(Debug, Args)]
pub struct ExportStatsArgs {
    #[command(flatten)]
    pub filter: StatsArgs,

    /// Output file (default: dns-stats-YYYY-MM-DD.xlsx)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments for `export-domains`.
#[derive(Debug, Args)]
pub struct ExportDomainsArgs {
    #[command(flatten)]
    pub filter: DomainsArgs,

    /// Output file (default: dns-domains-YYYY-MM-DD.xlsx)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Download the stats export and write it to disk.
pub async fn run_stats(client: &ApiClient, args: &ExportStatsArgs) -> Result<()> {
    let query = args.filter.query_params();
    let blob = client
        .export_stats(if query.is_empty() { None } else { Some(&query) })
        .await
        .context("failed to download stats export")?;

    let target = args.output.clone().unwrap_or_else(|| dated_filename("dns-stats"));
    write_export(&target, &blob).await
}

/// Download the domains export and write it to disk.
pub async fn run_domains(client: &ApiClient, args: &ExportDomainsArgs) -> Result<()> {
    let query = args.filter.query_params();
    let blob = client
        .export_domains(if query.is_empty() { None } else { Some(&query) })
        .await
        .context("failed to download domains export")?;

    let target = args.output.clone().unwrap_or_else(|| dated_filename("dns-domains"));
    write_export(&target, &blob).await
}

async fn write_export(target: &Path, blob: &Bytes) -> Result<()> {
    debug!(path = %target.display(), bytes = blob.len(), "writing export");
    tokio::fs::write(target, blob)
        .await
        .with_context(|| format!("failed to write {}", target.display()))?;
    println!("wrote {} ({} bytes)", target.display(), blob.len());
    Ok(())
}

fn dated_filename(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}-{}.xlsx", Local::now().format("%Y-%m-%d")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filename_matches_server_naming() {
        let name = dated_filename("dns-stats");
        let name = name.to_string_lossy();
        assert!(name.starts_with("dns-stats-"));
        assert!(name.ends_with(".xlsx"));
        // dns-stats-YYYY-MM-DD.xlsx
        assert_eq!(name.len(), "dns-stats-".len() + 10 + ".xlsx".len());
    }

    #[tokio::test]
    async fn export_payload_is_written_byte_for_byte() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("export.xlsx");
        let blob = Bytes::from_static(b"PK\x03\x04not really a workbook");

        write_export(&target, &blob).await.expect("write");

        let written = std::fs::read(&target).expect("read back");
        assert_eq!(written, blob.as_ref());
    }
}
