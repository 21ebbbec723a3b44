//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building one HTTP client per surface with a static browser-like header set
//! - Enforcing the politeness delay before every dispatch
//! - Error classification (transport, timeout, non-2xx status)
//!
//! Bodies are returned raw; decoding them is the caller's job.

use crate::config::{BoardConfig, HttpConfig};
use crate::crawler::candidates::RequestDescriptor;
use crate::crawler::delay::PolitenessDelay;
use crate::{ConfigError, HarvestError};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{tls, Client};
use std::sync::Arc;
use std::time::Duration;

/// Product marker header expected by the board API
pub const PRODUCT_HEADER: &str = "x-cafe-product";

/// A successful (2xx) response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Response body
    pub body: String,
}

/// Static request settings for one surface
#[derive(Debug, Clone)]
pub struct HttpProfile {
    pub headers: HeaderMap,
    pub timeout: Duration,
}

impl HttpProfile {
    /// Browser-like profile for markup pages
    pub fn page(config: &HttpConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, header_value("user-agent", &config.user_agent)?);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header_value("accept-language", &config.accept_language)?,
        );
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(
            header::UPGRADE_INSECURE_REQUESTS,
            HeaderValue::from_static("1"),
        );

        Ok(Self {
            headers,
            timeout: Duration::from_secs(config.page_timeout_secs),
        })
    }

    /// Authenticated profile for the board API
    pub fn api(config: &HttpConfig, board: &BoardConfig, cookie: &str) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header_value("api-user-agent", &config.api_user_agent)?,
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let mut cookie = header_value("cookie", cookie)?;
        cookie.set_sensitive(true);
        headers.insert(header::COOKIE, cookie);

        headers.insert(header::REFERER, header_value("origin", &board.origin)?);
        headers.insert(header::ORIGIN, header_value("origin", &board.origin)?);
        headers.insert(
            HeaderName::from_static(PRODUCT_HEADER),
            HeaderValue::from_static("pc"),
        );

        Ok(Self {
            headers,
            timeout: Duration::from_secs(config.api_timeout_secs),
        })
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value.trim()).map_err(|_| ConfigError::InvalidHeader(name.to_string()))
}

/// Builds an HTTP client for one surface
///
/// TLS 1.2 is the minimum accepted version and the profile's headers are sent
/// with every request.
///
/// # Example
///
/// ```no_run
/// use naver_harvest::config::HttpConfig;
/// use naver_harvest::crawler::{build_http_client, HttpProfile};
///
/// let profile = HttpProfile::page(&HttpConfig::default()).unwrap();
/// let client = build_http_client(&profile).unwrap();
/// ```
pub fn build_http_client(profile: &HttpProfile) -> Result<Client, reqwest::Error> {
    Client::builder()
        .default_headers(profile.headers.clone())
        .timeout(profile.timeout)
        .connect_timeout(Duration::from_secs(10))
        .min_tls_version(tls::Version::TLS_1_2)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Something that can perform a single GET for a request descriptor
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<FetchedPage, HarvestError>;
}

/// Fetches one URL per call, pausing for the politeness delay first
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    delay: Arc<dyn PolitenessDelay>,
}

impl Fetcher {
    pub fn new(client: Client, delay: Arc<dyn PolitenessDelay>) -> Self {
        Self { client, delay }
    }
}

#[async_trait]
impl Fetch for Fetcher {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<FetchedPage, HarvestError> {
        self.delay.wait_before_request().await;

        let url = request.url.as_str();
        let response = self
            .client
            .get(request.url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            return Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| classify_error(url, e))?;

        Ok(FetchedPage {
            url: final_url,
            status_code: status.as_u16(),
            body,
        })
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> HarvestError {
    if error.is_timeout() {
        HarvestError::Timeout {
            url: url.to_string(),
        }
    } else {
        HarvestError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
