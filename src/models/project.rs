//! Project rows parsed from the portal search results.

use serde::{Deserialize, Serialize};

/// One project row from the search results table.
///
/// `id` is the trailing path segment of the detail-page URL, or a synthetic
/// `project-{row}` when the row carries no detail link. Field names match the
/// JSON API (`doc_url` is snake_case there for historical reasons).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub proponent: String,
    pub status: String,
    /// Absolute URL of the project detail page.
    pub url: String,
    /// Absolute URL of the project documentation page, if linked.
    pub doc_url: String,
}

/// A page of search results plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub projects: Vec<Project>,
    pub total_pages: u32,
    pub current_page: u32,
    /// Number of projects on this page after filtering.
    pub total: usize,
    /// The status whitelist in effect, echoed for clients building filters.
    pub valid_statuses: Vec<String>,
}
