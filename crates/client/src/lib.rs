//! # DnsWatch Client
//!
//! Data-access layer for the DNS collector dashboard.
//!
//! This crate contains:
//! - The HTTP API client bound to the collector web API (`/api`)
//! - The query-parameter mapping forwarded verbatim to the backend
//! - The error type surfaced by client operations
//!
//! ## Architecture
//! - One [`ApiClient`] is constructed at startup and shared by every
//!   consumer; its configuration is immutable afterwards
//! - All operations are async GETs returning either parsed JSON or an
//!   opaque byte payload, chosen statically per operation
//! - Transport failures propagate unchanged; no retry, no caching

pub mod api;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientConfig, ApiError, QueryParams, QueryValue};
