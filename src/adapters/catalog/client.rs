//! HTTP catalog client
//!
//! [`HttpCatalogClient`] implements [`CatalogSource`] against the catalog's
//! REST 2.0 API. Each call issues one `GET {base_url}/rest/2.0/{endpoint}`
//! request and returns the `results` array of the response envelope.

use super::models::PagedResponse;
use super::source::{CatalogQuery, CatalogSource};
use crate::config::CatalogConfig;
use crate::domain::{CatalogError, Result, StewardError};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// REST root below the configured base URL
const API_ROOT: &str = "rest/2.0";

/// Catalog REST client
///
/// # Example
///
/// ```no_run
/// use steward::adapters::catalog::{CatalogQuery, CatalogSource, HttpCatalogClient};
/// use steward::config::CatalogConfig;
///
/// # async fn example() -> steward::domain::Result<()> {
/// let client = HttpCatalogClient::new(CatalogConfig::default())?;
/// let first_page = client.query(&CatalogQuery::communities().page(0, 100)).await?;
/// println!("{} communities on the first page", first_page.len());
/// # Ok(())
/// # }
/// ```
pub struct HttpCatalogClient {
    /// Base URL of the catalog server
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Catalog configuration
    config: CatalogConfig,
}

impl HttpCatalogClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is unusable or the HTTP
    /// client cannot be built.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            StewardError::Configuration(format!("Invalid catalog base_url '{base_url}': {e}"))
        })?;

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled for the catalog client");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            StewardError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        if config.auth_type == "basic" {
            tracing::info!("Using Basic Authentication for the catalog");
        } else {
            tracing::warn!("No catalog authentication configured, using anonymous access");
        }

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    /// Build authorization header value
    fn auth_header_value(&self) -> Option<String> {
        if self.config.auth_type != "basic" {
            return None;
        }

        match (&self.config.username, &self.config.password) {
            (Some(username), Some(password)) => {
                let credentials = format!("{username}:{}", password.expose_secret().as_str());
                let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
                Some(format!("Basic {encoded}"))
            }
            _ => None,
        }
    }

    /// Full request URL for a query, parameters percent-encoded
    fn request_url(&self, query: &CatalogQuery) -> Result<Url> {
        let raw = format!("{}/{API_ROOT}/{}", self.base_url, query.endpoint.path());
        let mut url = Url::parse(&raw).map_err(|e| {
            StewardError::Configuration(format!("Invalid request URL '{raw}': {e}"))
        })?;

        if !query.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query.params {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Retry a request with exponential backoff
    ///
    /// Only transport errors classified as retryable are retried.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let retry = &self.config.retry;
        let max_retries = retry.max_retries.max(1);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    let retryable = matches!(&e, StewardError::Catalog(c) if c.is_retryable());
                    if !retryable || attempt >= max_retries {
                        return Err(e);
                    }

                    let delay_ms = (retry.initial_delay_ms as f64
                        * retry.backoff_multiplier.powi(attempt as i32 - 1))
                        as u64;
                    let delay_ms = delay_ms.min(retry.max_delay_ms);

                    crate::log_retry_attempt!(attempt, max_retries, e.to_string());
                    tracing::debug!(delay_ms = delay_ms, "Backing off before retry");

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    /// Issue a single GET and unwrap the response envelope
    async fn get_results(&self, url: &Url) -> Result<Vec<serde_json::Value>> {
        let mut request = self.client.get(url.clone());

        if let Some(auth) = self.auth_header_value() {
            request = request.header("Authorization", auth);
        }

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Timeout(e.to_string())
            } else {
                CatalogError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let retry_after = retry_after(resp.headers());
            let body = resp.text().await.unwrap_or_default();
            return Err(status_error(status, body, retry_after).into());
        }

        let envelope = resp
            .json::<PagedResponse>()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        Ok(envelope.results)
    }

    /// Verify that the catalog is reachable and accepts the credentials
    ///
    /// # Errors
    ///
    /// Returns the error of the single community listing request.
    pub async fn health_check(&self) -> Result<()> {
        match self.query(&CatalogQuery::communities().page(0, 1)).await {
            Ok(_) => {
                tracing::info!(base_url = %self.base_url, "Catalog health check passed");
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    base_url = %self.base_url,
                    error = %e,
                    "Catalog health check failed"
                );
                Err(e)
            }
        }
    }

    /// Whether requests carry credentials
    pub fn is_authenticated(&self) -> bool {
        self.auth_header_value().is_some()
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn query(&self, query: &CatalogQuery) -> Result<Vec<serde_json::Value>> {
        let url = self.request_url(query)?;

        tracing::debug!(url = %url, endpoint = %query.endpoint, "Querying catalog");

        let results = self.retry_request(|| self.get_results(&url)).await?;

        tracing::debug!(
            endpoint = %query.endpoint,
            count = results.len(),
            "Catalog query returned {} items",
            results.len()
        );

        Ok(results)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn retry_after(headers: &HeaderMap) -> Option<String> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Map a non-success status to a catalog error
fn status_error(status: StatusCode, body: String, retry_after: Option<String>) -> CatalogError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CatalogError::AuthenticationFailed(format!("status {status}: {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            CatalogError::RateLimitExceeded(retry_after.unwrap_or_else(|| "unspecified".to_string()))
        }
        s if s.is_server_error() => CatalogError::ServerError {
            status: s.as_u16(),
            message: body,
        },
        s => CatalogError::ClientError {
            status: s.as_u16(),
            message: body,
        },
    }
}
