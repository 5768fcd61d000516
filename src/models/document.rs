//! Document rows parsed from a procedure's documentation table.

use serde::{Deserialize, Serialize};

/// One downloadable document from the documentation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLink {
    /// Trailing path segment of the raw download href.
    pub id: String,
    /// Filename from the table, falling back to `document-{id}.pdf`.
    pub filename: String,
    /// Absolute download URL.
    pub download_url: String,
}

/// The aggregated document list for a procedure, all pages flattened.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentList {
    pub docs: Vec<DocumentLink>,
    /// Number of listing pages the portal reported.
    pub total_pages: u32,
}
