//! Portal client: fetch + parse operations against the live portal.

use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use super::adapter::PortalAdapter;
use super::config::PortalConfig;
use super::http_client::{HttpClient, HttpResponse};
use crate::error::{PortalError, Result};
use crate::models::{DocumentList, SearchResults};

const DOWNLOAD_ACCEPT: &str = "application/pdf,application/octet-stream";

/// Client for the VIA/VAS portal.
///
/// Owns the HTTP client (politeness delay included) and the markup adapter.
/// All operations are sequential; no request is retried.
#[derive(Debug, Clone)]
pub struct PortalClient {
    config: PortalConfig,
    adapter: PortalAdapter,
    client: HttpClient,
}

impl PortalClient {
    /// Create a client from portal configuration.
    pub fn new(config: PortalConfig) -> Result<Self> {
        let adapter = PortalAdapter::new(&config)?;
        let client = HttpClient::with_user_agent(
            Duration::from_secs(config.timeout_secs),
            Duration::from_millis(config.request_delay_ms),
            config.user_agent.as_deref(),
        );
        Ok(Self {
            config,
            adapter,
            client,
        })
    }

    /// The portal configuration this client was built with.
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// The status whitelist in effect.
    pub fn valid_statuses(&self) -> &[String] {
        self.adapter.valid_statuses()
    }

    /// Direct download URL for a bare document id.
    pub fn direct_download_url(&self, document_id: &str) -> String {
        format!(
            "{}/File/Documento/{}",
            self.config.base_url.trim_end_matches('/'),
            document_id
        )
    }

    /// Search the portal for projects matching `keyword`.
    ///
    /// `status` narrows results server-side when it names a whitelisted
    /// status; `all`, unknown values, and `None` leave results unfiltered
    /// beyond the whitelist itself.
    pub async fn search(
        &self,
        keyword: &str,
        page: u32,
        status: Option<&str>,
    ) -> Result<SearchResults> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(PortalError::validation("Keyword is required"));
        }

        let mut url = Url::parse(&self.config.base_url)?.join(&self.config.search_path)?;
        url.query_pairs_mut()
            .append_pair("Testo", keyword)
            .append_pair("t", "o")
            .append_pair("pagina", &page.to_string());

        debug!("Searching portal: {}", url);
        let html = self.fetch_page(url.as_str()).await?;

        let status_filter = status.filter(|s| {
            *s != "all" && self.adapter.valid_statuses().iter().any(|v| v == s)
        });
        let (projects, total_pages) = self.adapter.parse_search_page(&html, status_filter);

        info!(
            "Search {:?} page {}: {} project(s), {} page(s)",
            keyword,
            page,
            projects.len(),
            total_pages
        );

        Ok(SearchResults {
            total: projects.len(),
            projects,
            total_pages,
            current_page: page,
            valid_statuses: self.adapter.valid_statuses().to_vec(),
        })
    }

    /// Collect documentation-section links from a project detail page.
    pub async fn procedure_links(&self, detail_url: &str) -> Result<Vec<String>> {
        if detail_url.trim().is_empty() {
            return Err(PortalError::validation("Detail URL is required"));
        }

        let decoded = urlencoding::decode(detail_url)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| detail_url.to_string());

        debug!("Parsing detail page: {}", decoded);
        let html = self.fetch_page(&decoded).await?;
        Ok(self.adapter.parse_procedure_links(&html))
    }

    /// Fetch the full document list for a procedure, walking every listing
    /// page. The politeness delay applies between page fetches.
    pub async fn document_list(&self, procedure_url: &str) -> Result<DocumentList> {
        if procedure_url.trim().is_empty() {
            return Err(PortalError::validation("Procedure URL is required"));
        }

        let mut docs = Vec::new();
        let mut total_pages = 1u32;
        let mut page = 1u32;

        loop {
            let url = page_url(procedure_url, page);
            debug!("Parsing procedure page: {}", url);
            let html = self.fetch_page(&url).await?;

            match self.adapter.parse_document_page(&html) {
                None => {
                    // No documentation table on this page; for page 1 that
                    // means the procedure lists nothing at all.
                    warn!("No documentation table found at {}", url);
                    if page == 1 {
                        total_pages = 0;
                    }
                    break;
                }
                Some((page_docs, reported_pages)) => {
                    debug!(
                        "Found {} doc(s) on page {}/{}",
                        page_docs.len(),
                        page,
                        reported_pages
                    );
                    docs.extend(page_docs);
                    total_pages = reported_pages.max(1);
                }
            }

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        info!(
            "Procedure {}: {} document(s) across {} page(s)",
            procedure_url,
            docs.len(),
            total_pages
        );
        Ok(DocumentList { docs, total_pages })
    }

    /// Fetch a document for proxying or saving. Returns the raw response so
    /// callers can stream the body.
    pub async fn fetch_document(&self, url: &str) -> Result<HttpResponse> {
        if url.trim().is_empty() {
            return Err(PortalError::validation("Document URL is required"));
        }
        Url::parse(url)?;

        debug!("Downloading document: {}", url);
        let response = self.client.get_accepting(url, Some(DOWNLOAD_ACCEPT)).await?;
        if !response.is_success() {
            return Err(PortalError::UpstreamStatus {
                status: response.status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    /// GET a portal page and return its body, mapping non-2xx to errors.
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).await?;
        if !response.is_success() {
            return Err(PortalError::UpstreamStatus {
                status: response.status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Append the `pagina` query parameter to a procedure URL.
fn page_url(base: &str, page: u32) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}pagina={page}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_separator() {
        assert_eq!(
            page_url("https://example.com/proc", 2),
            "https://example.com/proc?pagina=2"
        );
        assert_eq!(
            page_url("https://example.com/proc?id=1", 2),
            "https://example.com/proc?id=1&pagina=2"
        );
    }

    #[test]
    fn test_direct_download_url() {
        let client = PortalClient::new(PortalConfig::default()).unwrap();
        assert_eq!(
            client.direct_download_url("123"),
            "https://va.mite.gov.it/File/Documento/123"
        );
    }

    #[tokio::test]
    async fn test_search_rejects_blank_keyword() {
        let client = PortalClient::new(PortalConfig::default()).unwrap();
        let err = client.search("   ", 1, None).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_procedure_links_rejects_empty_url() {
        let client = PortalClient::new(PortalConfig::default()).unwrap();
        let err = client.procedure_links("").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_fetch_document_rejects_relative_url() {
        let client = PortalClient::new(PortalConfig::default()).unwrap();
        let err = client.fetch_document("/File/Documento/1").await.unwrap_err();
        assert!(matches!(err, PortalError::Url(_)));
    }
}
