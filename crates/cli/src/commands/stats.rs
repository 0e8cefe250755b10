//! `dnswatch stats`: aggregate query statistics.

use anyhow::{Context, Result};
use clap::Args;
use dnswatch_client::{ApiClient, QueryParams};

use super::{print_json, push_opt};

/// Filters understood by the stats endpoints. Every value is forwarded
/// verbatim; the backend applies its own defaults for anything omitted.
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Comma-separated client IPs to filter on
    #[arg(long)]
    pub client_ips: Option<String>,

    /// CIDR subnet filter (e.g. 192.168.0.0/24)
    #[arg(long)]
    pub subnet: Option<String>,

    /// RFC 3339 lower bound on the query timestamp
    #[arg(long)]
    pub date_from: Option<String>,

    /// RFC 3339 upper bound on the query timestamp
    #[arg(long)]
    pub date_to: Option<String>,

    /// Column to sort by
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction (asc or desc)
    #[arg(long)]
    pub sort_order: Option<String>,

    /// Page size
    #[arg(long)]
    pub limit: Option<u64>,

    /// Page offset
    #[arg(long)]
    pub offset: Option<u64>,
}

impl StatsArgs {
    /// Collect the given flags into request query parameters.
    pub fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_opt(&mut params, "client_ips", self.client_ips.as_deref());
        push_opt(&mut params, "subnet", self.subnet.as_deref());
        push_opt(&mut params, "date_from", self.date_from.as_deref());
        push_opt(&mut params, "date_to", self.date_to.as_deref());
        push_opt(&mut params, "sort_by", self.sort_by.as_deref());
        push_opt(&mut params, "sort_order", self.sort_order.as_deref());
        push_opt(&mut params, "limit", self.limit);
        push_opt(&mut params, "offset", self.offset);
        params
    }
}

/// Fetch and print the stats listing.
pub async fn run(client: &ApiClient, args: &StatsArgs) -> Result<()> {
    let query = args.query_params();
    let body = client
        .get_stats(if query.is_empty() { None } else { Some(&query) })
        .await
        .context("failed to fetch stats")?;
    print_json(&body)
}
