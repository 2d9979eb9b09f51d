//! HTTP client implementation shared by every packagecloud operation

use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, PRAGMA};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use tokio::sync::OnceCell;
use tracing::debug;
use url::Url;

use packagecloud_core::error::PackagecloudError;
use packagecloud_core::types::Distributions;
use crate::ApiResult;

/// Default packagecloud service location
pub const DEFAULT_BASE_URL: &str = "https://packagecloud.io";

/// Explicit configuration for a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API token, sent as the Basic-Auth username
    pub token: String,
    /// Service base URL, without the `/api/v1` suffix
    pub base_url: String,
}

impl ClientConfig {
    /// Configuration for the public service
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another service location
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Main HTTP client for packagecloud operations
#[derive(Debug, Clone)]
pub struct PackagecloudClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Base service URL
    base_url: String,
    /// Precomputed `Basic` authorization value
    auth_header: HeaderValue,
    /// Distribution catalog, fetched on first use
    pub(crate) distributions: Arc<OnceCell<Distributions>>,
}

impl PackagecloudClient {
    /// Create a client from an explicit configuration
    ///
    /// Fails with InvalidArgument when the token is empty, so no request is
    /// ever sent without credentials.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        if config.token.is_empty() {
            return Err(PackagecloudError::invalid_argument("empty packagecloud token"));
        }
        Url::parse(&config.base_url).map_err(|e| {
            PackagecloudError::invalid_argument(format!("invalid base url {}: {}", config.base_url, e))
        })?;

        let credentials = general_purpose::STANDARD.encode(format!("{}:", config.token));
        let mut auth_header = HeaderValue::from_str(&format!("Basic {}", credentials))
            .map_err(|e| PackagecloudError::invalid_argument(format!("invalid token: {}", e)))?;
        auth_header.set_sensitive(true);

        let client = ClientBuilder::new()
            // Connection pooling configuration
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(Duration::from_secs(90))
            // Uploads can be large, so only connecting is bounded
            .connect_timeout(Duration::from_secs(30))
            .gzip(true)
            .user_agent(concat!("packagecloud-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PackagecloudError::network(format!("failed to create HTTP client: {}", e), e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_header,
            distributions: Arc::new(OnceCell::new()),
        })
    }

    /// Base service URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of an API endpoint below `/api/v1/`
    pub(crate) fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}/api/v1/{}", self.base_url, path);
        Url::parse(&raw)
            .map_err(|e| PackagecloudError::invalid_argument(format!("invalid url {}: {}", raw, e)))
    }

    /// Resolve a path returned by the service (or an absolute URL) against the base URL
    pub(crate) fn resolve(&self, path_or_url: &str) -> ApiResult<Url> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| PackagecloudError::invalid_argument(format!("invalid base url: {}", e)))?;
        base.join(path_or_url)
            .map_err(|e| PackagecloudError::invalid_argument(format!("invalid url {}: {}", path_or_url, e)))
    }

    /// Whether a URL points at the configured service
    pub(crate) fn is_service_url(&self, url: &Url) -> bool {
        match Url::parse(&self.base_url) {
            Ok(base) => base.origin() == url.origin(),
            Err(_) => false,
        }
    }

    /// Authenticated request accepting JSON
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(AUTHORIZATION, self.auth_header.clone())
            .header(ACCEPT, "application/json")
    }

    /// Authenticated request for an operation that changes server state
    pub(crate) fn mutating(&self, method: Method, url: Url) -> RequestBuilder {
        self.request(method, url).header(PRAGMA, "no-cache")
    }

    /// Request without service credentials, for third-party hosts
    pub(crate) fn anonymous(&self, url: Url) -> RequestBuilder {
        self.client.get(url)
    }

    /// Attach credentials to a request built with [`Self::anonymous`]
    pub(crate) fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(AUTHORIZATION, self.auth_header.clone())
    }

    /// Send a request, mapping transport failures to a network error
    pub(crate) async fn send(&self, builder: RequestBuilder, action: &str) -> ApiResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| PackagecloudError::network(format!("http {}: {}", action, e), e))?;
        debug!(
            "{} {} -> {}",
            action,
            response.url(),
            response.status()
        );
        Ok(response)
    }
}

/// Append query parameters, skipping absent or empty values
pub(crate) fn append_query(url: &mut Url, params: &[(&str, Option<&str>)]) {
    let present: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(key, value)| match value {
            Some(v) if !v.is_empty() => Some((*key, *v)),
            _ => None,
        })
        .collect();
    if !present.is_empty() {
        url.query_pairs_mut().extend_pairs(present);
    }
}
