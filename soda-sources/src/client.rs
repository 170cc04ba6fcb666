//! Read-only client for one Socrata host

use crate::endpoint::Endpoint;
use crate::error::{Result, SodaError};
use crate::metadata::DatasetMetadata;
use crate::pagination::{collect_pages, paginate};
use crate::query::SoqlQuery;
use crate::rate_limiter::{RateLimiter, RateLimiterConfig};
use crate::record::ResultSet;
use crate::retry::RetryPolicy;
use crate::traits::RecordSource;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_URI_PREFIX: &str = "https://";

/// Header carrying the app token.
pub const APP_TOKEN_HEADER: &str = "X-App-Token";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme prepended to the host
    pub uri_prefix: String,
    /// Timeout for each request (seconds)
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Retry policy; `None` means every failure is returned immediately
    pub retry: Option<RetryPolicy>,
    /// Client-side throttle; `None` means no throttling
    pub rate_limit: Option<RateLimiterConfig>,
    /// Domains pinned to fixed addresses instead of DNS lookups. The port of
    /// the address is ignored; put the port in the host.
    pub resolve: Vec<(String, SocketAddr)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            uri_prefix: DEFAULT_URI_PREFIX.to_string(),
            timeout_secs: 10,
            user_agent: concat!("soda-sources/", env!("CARGO_PKG_VERSION")).to_string(),
            retry: None,
            rate_limit: None,
            resolve: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn with_uri_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.uri_prefix = prefix.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    pub fn with_rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.rate_limit = Some(config);
        self
    }

    pub fn with_resolve(mut self, domain: impl Into<String>, addr: SocketAddr) -> Self {
        self.resolve.push((domain.into(), addr));
        self
    }
}

/// Fetches resources from a single host.
///
/// Holds no mutable state: one client can serve any number of fetches,
/// concurrently if the caller wants.
#[derive(Debug)]
pub struct ResourceClient {
    endpoint: Endpoint,
    config: ClientConfig,
    client: Client,
    limiter: Option<RateLimiter>,
}

impl ResourceClient {
    /// No network activity happens here. The host is only checked once a
    /// request is built.
    pub fn new(endpoint: Endpoint, config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone());
        for (domain, addr) in &config.resolve {
            builder = builder.resolve(domain, *addr);
        }

        let client = builder
            .build()
            .map_err(|e| SodaError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        let limiter = config.rate_limit.as_ref().map(RateLimiter::new).transpose()?;

        if !endpoint.has_token() {
            warn!(
                "No app token for {}: requests will be subject to strict throttling",
                endpoint.host()
            );
        }

        Ok(Self {
            endpoint,
            config,
            client,
            limiter,
        })
    }

    pub fn with_defaults(endpoint: Endpoint) -> Result<Self> {
        Self::new(endpoint, ClientConfig::default())
    }

    pub fn host(&self) -> &str {
        self.endpoint.host()
    }

    pub fn has_token(&self) -> bool {
        self.endpoint.has_token()
    }

    pub fn uri_prefix(&self) -> &str {
        &self.config.uri_prefix
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{prefix}{host}/resource/{dataset}.json`
    pub fn resource_url(&self, dataset: &str) -> Result<Url> {
        if dataset.trim().is_empty() {
            return Err(SodaError::ConfigError("dataset identifier is empty".to_string()));
        }
        self.build_url(&["resource", &format!("{}.json", dataset)])
    }

    /// `{prefix}{host}/api/views/{dataset}.json`
    pub fn metadata_url(&self, dataset: &str) -> Result<Url> {
        if dataset.trim().is_empty() {
            return Err(SodaError::ConfigError("dataset identifier is empty".to_string()));
        }
        self.build_url(&["api", "views", &format!("{}.json", dataset)])
    }

    fn build_url(&self, segments: &[&str]) -> Result<Url> {
        let host = self.endpoint.host();
        if host.trim().is_empty() {
            return Err(SodaError::ConfigError("host is empty".to_string()));
        }

        let base = format!("{}{}", self.config.uri_prefix, host.trim_end_matches('/'));
        let mut url = Url::parse(&base)
            .map_err(|e| SodaError::ConfigError(format!("Invalid host '{}': {}", host, e)))?;

        url.path_segments_mut()
            .map_err(|_| SodaError::ConfigError(format!("'{}' cannot be used as a base URL", base)))?
            .clear()
            .extend(segments);

        Ok(url)
    }

    /// One request for `dataset`. The result may be truncated by the remote;
    /// see [`ResourceClient::fetch_all`] to page through everything.
    pub async fn fetch(&self, dataset: &str, query: &SoqlQuery) -> Result<ResultSet> {
        let mut url = self.resource_url(dataset)?;
        let params = query.to_params();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        let body = self.get_body(url).await?;
        let rows = ResultSet::from_json(&body)?;
        debug!("Fetched {} rows from {}/{}", rows.len(), self.host(), dataset);
        Ok(rows)
    }

    pub async fn fetch_metadata(&self, dataset: &str) -> Result<DatasetMetadata> {
        let url = self.metadata_url(dataset)?;
        let body = self.get_body(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Pages through `dataset` with `$limit`/`$offset` and concatenates the
    /// pages in order.
    pub async fn fetch_all(
        &self,
        dataset: &str,
        query: &SoqlQuery,
        page_size: usize,
    ) -> Result<ResultSet> {
        collect_pages(paginate(self, dataset, query, page_size)).await
    }

    async fn get_body(&self, url: Url) -> Result<String> {
        match &self.config.retry {
            Some(policy) => policy.run("GET", || self.send_once(url.clone())).await,
            None => self.send_once(url).await,
        }
    }

    async fn send_once(&self, url: Url) -> Result<String> {
        if let Some(limiter) = &self.limiter {
            limiter.acquire().await;
        }

        debug!("Fetching: {}", url);

        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(token) = self.endpoint.token() {
            request = request.header(APP_TOKEN_HEADER, token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Could not read error body for HTTP {}: {}", status, e);
                    String::new()
                }
            };
            return Err(SodaError::RemoteError {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| SodaError::TransportError(e.to_string()))
    }
}

impl RecordSource for ResourceClient {
    fn fetch_page<'a>(
        &'a self,
        dataset: &'a str,
        query: &'a SoqlQuery,
    ) -> Pin<Box<dyn Future<Output = Result<ResultSet>> + Send + 'a>> {
        Box::pin(self.fetch(dataset, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(host: &str) -> ResourceClient {
        ResourceClient::with_defaults(Endpoint::anonymous(host)).unwrap()
    }

    #[test]
    fn test_resource_url() {
        let url = client("opendata.socrata.com").resource_url("f92i-ik66").unwrap();
        assert_eq!(url.as_str(), "https://opendata.socrata.com/resource/f92i-ik66.json");
    }

    #[test]
    fn test_metadata_url() {
        let url = client("data.cityofnewyork.us").metadata_url("fhrw-4uyv").unwrap();
        assert_eq!(url.as_str(), "https://data.cityofnewyork.us/api/views/fhrw-4uyv.json");
    }

    #[test]
    fn test_uri_prefix_and_port() {
        let c = ResourceClient::new(
            Endpoint::anonymous("127.0.0.1:8080"),
            ClientConfig::default().with_uri_prefix("http://"),
        )
        .unwrap();
        assert_eq!(c.uri_prefix(), "http://");
        assert_eq!(
            c.resource_url("abcd-1234").unwrap().as_str(),
            "http://127.0.0.1:8080/resource/abcd-1234.json"
        );
    }

    #[test]
    fn test_dataset_is_one_path_segment() {
        let url = client("opendata.socrata.com").resource_url("a/b").unwrap();
        assert_eq!(url.path(), "/resource/a%2Fb.json");
    }

    #[test]
    fn test_construct_accepts_empty_host() {
        // Host problems surface on fetch, not on construction.
        let c = client("");
        assert!(matches!(c.resource_url("f92i-ik66"), Err(SodaError::ConfigError(_))));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let err = client("opendata.socrata.com").resource_url("  ").unwrap_err();
        assert!(matches!(err, SodaError::ConfigError(_)));
    }

    #[test]
    fn test_accessors() {
        let c = ResourceClient::with_defaults(Endpoint::new(
            "opendata.socrata.com",
            Some("token".to_string()),
        ))
        .unwrap();
        assert_eq!(c.host(), "opendata.socrata.com");
        assert!(c.has_token());
        assert_eq!(c.uri_prefix(), DEFAULT_URI_PREFIX);
        assert_eq!(c.config().timeout_secs, 10);
        assert!(c.config().retry.is_none());
    }

    #[test]
    fn test_invalid_rate_limit_fails_construction() {
        let config = ClientConfig::default().with_rate_limit(RateLimiterConfig {
            requests_per_second: 0,
            burst_size: 1,
        });
        let err = ResourceClient::new(Endpoint::anonymous("opendata.socrata.com"), config).unwrap_err();
        assert!(matches!(err, SodaError::ConfigError(_)));
    }
}
