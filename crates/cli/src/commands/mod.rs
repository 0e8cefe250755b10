//! Subcommand implementations for the dnswatch binary.

pub mod domains;
pub mod export;
pub mod stats;

use anyhow::{bail, Context, Result};
use dnswatch_client::{ApiClient, QueryParams, QueryValue};
use serde_json::Value;

/// Render a JSON payload for the terminal, unchanged apart from
/// pretty-printing.
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Append a parameter only when the flag was actually given; absent flags
/// are not sent at all.
pub fn push_opt<V: Into<QueryValue>>(params: &mut QueryParams, key: &str, value: Option<V>) {
    if let Some(value) = value {
        params.push(key, value);
    }
}

/// `dnswatch health`: probe the server.
pub async fn health(client: &ApiClient) -> Result<()> {
    let healthy = client.health_check().await.context("health check failed")?;
    if !healthy {
        bail!("server reachable but reported unhealthy");
    }
    println!("ok");
    Ok(())
}
