//! HTTP client for the dashboard API.
//!
//! Provides the fixed set of typed request operations the dashboard views
//! consume: aggregate stats, domain listings, single-domain lookup, and
//! two bulk exports retrieved as opaque byte payloads.

use std::fmt::Display;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

use super::errors::ApiError;
use super::query::QueryParams;

/// Prefix every API route is mounted under.
const API_PREFIX: &str = "/api";

/// Configuration for [`ApiClient`].
///
/// Consumed once at construction; the resulting client never changes its
/// configuration afterwards.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Server origin the dashboard talks to (e.g. `http://localhost:8080`).
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the stats and domains endpoints of the collector web API.
///
/// Construct one instance at startup and share it; the handle is cheap to
/// clone and all state behind it is immutable. Every operation issues a
/// single GET and resolves to either parsed JSON or an opaque byte
/// payload; which of the two is fixed per operation, never inferred from
/// the response.
///
/// Calls may be in flight concurrently with no ordering guarantee between
/// their completions; callers needing ordering await one call before
/// issuing the next.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from the given configuration.
    ///
    /// Sets the request timeout and the fixed
    /// `Content-Type: application/json` default header; a trailing slash
    /// on the origin is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Convenience constructor: default configuration with the given
    /// origin.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::new(ApiClientConfig {
            base_url: base_url.into(),
            ..ApiClientConfig::default()
        })
    }

    /// Fetch aggregate query statistics (`GET /api/stats`).
    ///
    /// # Errors
    ///
    /// Forwards the transport failure unchanged if the exchange cannot be
    /// completed or the body is not valid JSON.
    pub async fn get_stats(&self, params: Option<&QueryParams>) -> Result<Value, ApiError> {
        self.get_json("/stats", params).await
    }

    /// List observed domains (`GET /api/domains`).
    ///
    /// # Errors
    ///
    /// Forwards the transport failure unchanged if the exchange cannot be
    /// completed or the body is not valid JSON.
    pub async fn get_domains(&self, params: Option<&QueryParams>) -> Result<Value, ApiError> {
        self.get_json("/domains", params).await
    }

    /// Fetch one domain by identifier (`GET /api/domains/{id}`).
    ///
    /// The identifier is interpolated verbatim into the path segment; no
    /// format validation happens here. A malformed identifier surfaces
    /// only as whatever error the backend returns.
    ///
    /// # Errors
    ///
    /// Forwards the transport failure unchanged if the exchange cannot be
    /// completed or the body is not valid JSON.
    pub async fn get_domain_by_id(&self, id: impl Display) -> Result<Value, ApiError> {
        self.get_json(&format!("/domains/{id}"), None).await
    }

    /// Download the stats export (`GET /api/stats/export`).
    ///
    /// The response body is handed back untouched; export payloads are
    /// never parsed as JSON.
    ///
    /// # Errors
    ///
    /// Forwards the transport failure unchanged if the exchange cannot be
    /// completed.
    pub async fn export_stats(&self, params: Option<&QueryParams>) -> Result<Bytes, ApiError> {
        self.get_bytes("/stats/export", params).await
    }

    /// Download the domains export (`GET /api/domains/export`).
    ///
    /// # Errors
    ///
    /// Forwards the transport failure unchanged if the exchange cannot be
    /// completed.
    pub async fn export_domains(&self, params: Option<&QueryParams>) -> Result<Bytes, ApiError> {
        self.get_bytes("/domains/export", params).await
    }

    /// Probe the server health endpoint (`GET /health`, mounted outside
    /// the API prefix).
    ///
    /// Returns `Ok(true)` on a success status and `Ok(false)` when the
    /// server answered with anything else; only a failed exchange is an
    /// error.
    ///
    /// # Errors
    ///
    /// Forwards the transport failure unchanged if the server cannot be
    /// reached.
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        let url = format!("{}/health", self.base_url);
        debug!(%url, "health check");

        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    async fn send_get(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        debug!(%url, "GET request");

        let mut request = self.client.get(&url);
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await?.error_for_status()?;
        debug!(%url, status = %response.status(), "received response");
        Ok(response)
    }

    async fn get_json(&self, path: &str, params: Option<&QueryParams>) -> Result<Value, ApiError> {
        let response = self.send_get(path, params).await?;
        Ok(response.json().await?)
    }

    async fn get_bytes(&self, path: &str, params: Option<&QueryParams>) -> Result<Bytes, ApiError> {
        let response = self.send_get(path, params).await?;
        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::with_base_url(server.uri()).expect("client")
    }

    #[tokio::test]
    async fn stats_issues_single_get_with_encoded_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .and(query_param("limit", "50"))
            .and(query_param("sort_by", "timestamp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 7})))
            .expect(1)
            .mount(&server)
            .await;

        let params = QueryParams::new().with("limit", 50_i64).with("sort_by", "timestamp");
        let body = client_for(&server).get_stats(Some(&params)).await.expect("stats");

        assert_eq!(body, json!({"total": 7}));
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn stats_without_params_has_no_query_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        client_for(&server).get_stats(None).await.expect("stats");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn domains_list_forwards_params_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/domains"))
            .and(query_param("domain_regex", ".*\\.lan"))
            .and(query_param("sort_order", "desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let params = QueryParams::new()
            .with("domain_regex", ".*\\.lan")
            .with("sort_order", "desc");
        let body = client_for(&server).get_domains(Some(&params)).await.expect("domains");

        assert_eq!(body, json!({"data": []}));
    }

    #[tokio::test]
    async fn domain_by_id_interpolates_identifier_into_path() {
        let server = MockServer::start().await;
        let domain = json!({"id": 42, "domain": "example.com", "ips": ["93.184.216.34"]});
        Mock::given(method("GET"))
            .and(path("/api/domains/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(domain.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server).get_domain_by_id("42").await.expect("domain");

        // Whatever the backend returned, unchanged.
        assert_eq!(body, domain);
    }

    #[tokio::test]
    async fn domain_by_id_accepts_numeric_identifiers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/domains/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
            .mount(&server)
            .await;

        let body = client_for(&server).get_domain_by_id(7).await.expect("domain");
        assert_eq!(body["id"], 7);
    }

    #[tokio::test]
    async fn exports_return_opaque_bytes_without_parsing() {
        let server = MockServer::start().await;
        // Deliberately not JSON: the first bytes of an xlsx (zip) payload.
        let payload: &[u8] = b"PK\x03\x04binary workbook";
        Mock::given(method("GET"))
            .and(path("/api/stats/export"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload))
            .expect(1)
            .mount(&server)
            .await;

        let blob = client_for(&server).export_stats(None).await.expect("export");
        assert_eq!(blob.as_ref(), payload);
    }

    #[tokio::test]
    async fn export_stats_encodes_date_range_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats/export"))
            .and(query_param("from", "2024-01-01"))
            .and(query_param("to", "2024-02-01"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK".as_slice()))
            .expect(1)
            .mount(&server)
            .await;

        let params = QueryParams::new().with("from", "2024-01-01").with("to", "2024-02-01");
        let blob = client_for(&server).export_stats(Some(&params)).await.expect("export");

        assert_eq!(blob.as_ref(), b"PK");
    }

    #[tokio::test]
    async fn export_domains_hits_its_own_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/domains/export"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK".as_slice()))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).export_domains(None).await.expect("export");
    }

    #[tokio::test]
    async fn requests_carry_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/domains"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).get_domains(None).await.expect("domains");
    }

    #[tokio::test]
    async fn non_success_status_surfaces_as_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_stats(None).await.expect_err("should fail");
        assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn network_failure_propagates_unchanged() {
        // Bind then drop so the port refuses connections.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::with_base_url(format!("http://{addr}")).expect("client");
        let err = client.get_domains(None).await.expect_err("should fail");

        match err {
            ApiError::Transport(inner) => assert!(inner.is_connect() || inner.is_request()),
            ApiError::Config(msg) => panic!("expected transport error, got config: {msg}"),
        }
    }

    #[tokio::test]
    async fn health_check_reports_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        assert!(client_for(&server).health_check().await.expect("health"));
    }

    #[tokio::test]
    async fn health_check_reports_unhealthy_without_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(!client_for(&server).health_check().await.expect("health"));
    }

    #[tokio::test]
    async fn trailing_slash_on_origin_is_trimmed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(format!("{}/", server.uri())).expect("client");
        client.get_stats(None).await.expect("stats");
    }
}
