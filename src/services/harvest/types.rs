//! Harvest pipeline types.

use std::path::PathBuf;

use crate::models::DocumentLink;

/// Configuration for a harvest run.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Directory harvested files are written into.
    pub output_dir: PathBuf,
    /// Delay between document downloads, in milliseconds.
    pub download_delay_ms: u64,
}

/// One document scheduled for download, with the project it belongs to.
#[derive(Debug, Clone)]
pub struct PlannedDownload {
    pub project_id: String,
    pub doc: DocumentLink,
}

/// Progress events emitted while harvesting.
///
/// The service stays UI-free; the CLI renders these however it likes.
#[derive(Debug, Clone)]
pub enum HarvestEvent {
    /// Discovery finished; the exact number of downloads is known.
    PlanReady { total_documents: usize },
    /// Discovery started for a project.
    ProjectStarted { project_id: String, title: String },
    /// A procedure's document list could not be fetched; it was skipped.
    ProcedureFailed { procedure_url: String, error: String },
    /// A document landed on disk.
    DocumentDownloaded { filename: String, bytes: u64 },
    /// A document failed to download; the run continues.
    DocumentFailed { filename: String, error: String },
}

/// Final counts for a harvest run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// Projects whose procedures were walked.
    pub projects: usize,
    /// Procedures whose document lists were aggregated.
    pub procedures: usize,
    /// Documents written to disk.
    pub downloaded: usize,
    /// Documents or procedures that failed and were skipped.
    pub failed: usize,
}
