//! `dnswatch domains` and `dnswatch domain <id>`: domain listings and
//! single-domain lookups.

use anyhow::{Context, Result};
use clap::Args;
use dnswatch_client::{ApiClient, QueryParams};

use super::{print_json, push_opt};

/// Filters understood by the domains endpoints. Forwarded verbatim.
#[derive(Debug, Args)]
pub struct DomainsArgs {
    /// Regular expression matched against domain names by the backend
    #[arg(long)]
    pub domain_regex: Option<String>,

    /// RFC 3339 lower bound on first insertion time
    #[arg(long)]
    pub date_from: Option<String>,

    /// RFC 3339 upper bound on first insertion time
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

impl DomainsArgs {
    /// Collect the given flags into request query parameters.
    pub fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_opt(&mut params, "domain_regex", self.domain_regex.as_deref());
        push_opt(&mut params, "date_from", self.date_from.as_deref());
        push_opt(&mut params, "date_to", self.date_to.as_deref());
        push_opt(&mut params, "sort_by", self.sort_by.as_deref());
        push_opt(&mut params, "sort_order", self.sort_order.as_deref());
        push_opt(&mut params, "limit", self.limit);
        push_opt(&mut params, "offset", self.offset);
        params
    }
}

/// Fetch and print the domain listing.
pub async fn run(client: &ApiClient, args: &DomainsArgs) -> Result<()> {
    let query = args.query_params();
    let body = client
        .get_domains(if query.is_empty() { None } else { Some(&query) })
        .await
        .context("failed to fetch domains")?;
    print_json(&body)
}

/// Fetch and print one domain by identifier. The identifier goes into the
/// request path exactly as typed.
pub async fn show(client: &ApiClient, id: &str) -> Result<()> {
    let body = client
        .get_domain_by_id(id)
        .await
        .with_context(|| format!("failed to fetch domain {id}"))?;
    print_json(&body)
}
