//! Dashboard API client
//!
//! This module is the single point through which all server communication
//! happens: aggregate stats, domain listings, single-domain lookups, and
//! bulk exports retrieved as opaque byte payloads.
//!
//! # Architecture
//!
//! - One shared, immutable client per process (construct once, pass by
//!   reference or clone the cheap handle)
//! - Query parameters are forwarded verbatim; the backend owns validation
//! - JSON vs. binary response handling is fixed per operation, never
//!   inferred from the response

pub mod client;
pub mod errors;
pub mod query;

pub use client::{ApiClient, ApiClientConfig};
pub use errors::ApiError;
pub use query::{QueryParams, QueryValue};
