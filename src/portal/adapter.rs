//! Portal markup adapter.
//!
//! The single place that knows the portal's HTML structure. Everything here
//! is pure `html -> rows` parsing; fetching lives in [`super::client`].
//! Missing tables and selectors degrade to empty results, never errors.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::config::PortalConfig;
use crate::error::{PortalError, Result};
use crate::models::{DocumentLink, Project};

/// Parses portal pages into model rows using injected selectors.
#[derive(Debug, Clone)]
pub struct PortalAdapter {
    base_url: Url,
    valid_statuses: Vec<String>,
    search_rows: Selector,
    pagination_label: Selector,
    documentation_table: Selector,
    download_anchor: Selector,
    procedure_anchor: Selector,
    table_row: Selector,
    cell: Selector,
    anchor: Selector,
    page_label: Regex,
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| PortalError::validation(format!("invalid selector {s:?}: {e}")))
}

impl PortalAdapter {
    /// Build an adapter from portal configuration.
    pub fn new(config: &PortalConfig) -> Result<Self> {
        let selectors = &config.selectors;
        Ok(Self {
            base_url: Url::parse(&config.base_url)?,
            valid_statuses: config.valid_statuses.clone(),
            search_rows: parse_selector(&selectors.search_rows)?,
            pagination_label: parse_selector(&selectors.pagination_label)?,
            documentation_table: parse_selector(&selectors.documentation_table)?,
            download_anchor: parse_selector(&selectors.download_anchor)?,
            procedure_anchor: parse_selector(&format!(
                r#"a[href*="{}"]"#,
                selectors.documentation_link_marker
            ))?,
            table_row: parse_selector("tr")?,
            cell: parse_selector("td")?,
            anchor: parse_selector("a")?,
            page_label: Regex::new(r"Pagina\s+(\d+)\s+di\s+(\d+)").expect("pagination regex"),
        })
    }

    /// The configured status whitelist.
    pub fn valid_statuses(&self) -> &[String] {
        &self.valid_statuses
    }

    /// Parse a search results page into projects plus the reported page count.
    ///
    /// Rows with a status outside the whitelist are dropped; `status_filter`
    /// additionally narrows to one status when set.
    pub fn parse_search_page(
        &self,
        html: &str,
        status_filter: Option<&str>,
    ) -> (Vec<Project>, u32) {
        let document = Html::parse_document(html);
        let mut projects = Vec::new();

        for (index, row) in document.select(&self.search_rows).skip(1).enumerate() {
            let cells: Vec<ElementRef> = row.select(&self.cell).collect();
            if cells.len() < 5 {
                continue;
            }

            let status = cell_text(&cells[2]);
            if !self.valid_statuses.iter().any(|s| s == &status) {
                continue;
            }
            if let Some(filter) = status_filter {
                if status != filter {
                    continue;
                }
            }

            let info_href = first_href(&cells[3], &self.anchor);
            let doc_href = first_href(&cells[4], &self.anchor);

            let id = info_href
                .and_then(|h| trailing_segment(h))
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("project-{index}"));

            projects.push(Project {
                id,
                title: cell_text(&cells[0]),
                proponent: cell_text(&cells[1]),
                status,
                url: info_href.map(|h| self.absolute(h)).unwrap_or_default(),
                doc_url: doc_href.map(|h| self.absolute(h)).unwrap_or_default(),
            });
        }

        (projects, self.total_pages(&document))
    }

    /// Collect documentation-section links from a detail page, deduplicated
    /// by absolute URL, in document order.
    pub fn parse_procedure_links(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let mut links: Vec<String> = Vec::new();

        for element in document.select(&self.procedure_anchor) {
            let href = match element.value().attr("href") {
                Some(h) if !h.is_empty() => h,
                _ => continue,
            };
            let full_url = self.absolute(href);
            if full_url.is_empty() {
                continue;
            }
            if !links.contains(&full_url) {
                links.push(full_url);
            }
        }

        links
    }

    /// Parse one documentation-table page.
    ///
    /// Returns `None` when the page carries no documentation table at all,
    /// which terminates pagination. Rows with fewer than 9 columns or without
    /// a titled download anchor are skipped.
    pub fn parse_document_page(&self, html: &str) -> Option<(Vec<DocumentLink>, u32)> {
        let document = Html::parse_document(html);
        let table = document.select(&self.documentation_table).next()?;

        let mut docs = Vec::new();
        for row in table.select(&self.table_row).skip(1) {
            let cells: Vec<ElementRef> = row.select(&self.cell).collect();
            if cells.len() < 9 {
                continue;
            }

            let href = match first_href(&cells[8], &self.download_anchor) {
                Some(h) => h,
                None => continue,
            };

            let id = trailing_segment(href).unwrap_or("document").to_string();
            let name = cell_text(&cells[1]);
            docs.push(DocumentLink {
                filename: if name.is_empty() {
                    format!("document-{id}.pdf")
                } else {
                    name
                },
                download_url: self.absolute(href),
                id,
            });
        }

        Some((docs, self.total_pages(&document)))
    }

    /// Read the total page count out of the "Pagina N di M" label.
    /// Defaults to 1 when the label is absent or unparseable.
    fn total_pages(&self, document: &Html) -> u32 {
        let label: String = document
            .select(&self.pagination_label)
            .flat_map(|e| e.text())
            .collect();

        self.page_label
            .captures(&label)
            .and_then(|c| c.get(2))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(1)
    }

    /// Resolve an href against the portal base, or empty when unresolvable.
    fn absolute(&self, href: &str) -> String {
        self.base_url
            .join(href)
            .map(|u| u.to_string())
            .unwrap_or_default()
    }
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Href of the first anchor matching `selector` inside `cell`.
fn first_href<'a>(cell: &ElementRef<'a>, selector: &Selector) -> Option<&'a str> {
    cell.select(selector).next().and_then(|a| a.value().attr("href"))
}

/// Last path segment of an href, used as a document or project id.
fn trailing_segment(href: &str) -> Option<&str> {
    href.rsplit('/').next().filter(|s| !s.is_empty())
}
