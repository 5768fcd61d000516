//! HTTP client for portal requests.
//!
//! Wraps `reqwest` with the browser-like headers the portal expects and a
//! fixed politeness delay applied after every request. All portal traffic is
//! strictly sequential, so the delay doubles as the crawl rate limit.

mod response;
mod user_agent;

pub use response::{parse_content_disposition_filename, HttpResponse};
pub use user_agent::{resolve_user_agent, IMPERSONATE_USER_AGENTS, USER_AGENT};

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;

const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// HTTP client with politeness delay and user-agent resolution.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    request_delay: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with the default user agent.
    pub fn new(timeout: Duration, request_delay: Duration) -> Self {
        Self::with_user_agent(timeout, request_delay, None)
    }

    /// Create a new HTTP client with custom user agent configuration.
    /// - None: use the default browser-like user agent
    /// - Some("impersonate"): rotate through real browser user agents
    /// - Some(custom): use the given string verbatim
    pub fn with_user_agent(
        timeout: Duration,
        request_delay: Duration,
        user_agent_config: Option<&str>,
    ) -> Self {
        let user_agent = resolve_user_agent(user_agent_config);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .user_agent(&user_agent)
            .timeout(timeout)
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            request_delay,
        }
    }

    /// The configured politeness delay.
    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /// Make a GET request, then apply the politeness delay.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        self.get_accepting(url, None).await
    }

    /// Make a GET request with an `Accept` override (document downloads).
    pub async fn get_accepting(
        &self,
        url: &str,
        accept: Option<&str>,
    ) -> Result<HttpResponse, reqwest::Error> {
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let response = request.send().await?;

        let mut headers = std::collections::HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.to_string(), v.to_string());
            }
        }

        tokio::time::sleep(self.request_delay).await;

        Ok(HttpResponse {
            status: response.status(),
            headers,
            response,
        })
    }

    /// Get page content as text.
    pub async fn get_text(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.get(url).await?;
        response.text().await
    }
}
