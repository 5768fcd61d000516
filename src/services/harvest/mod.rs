//! Bulk document harvesting.
//!
//! Walks project → procedure links → document lists → downloads, strictly
//! sequentially. A discovery pass builds the complete download plan first so
//! progress totals are exact, then documents are fetched one at a time with a
//! politeness delay. Failures are counted and skipped, never fatal to the
//! run. Separated from UI concerns - emits events for progress tracking.

mod types;

use std::time::Duration;

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::models::Project;
use crate::portal::PortalClient;
use crate::utils::sanitize_filename;

pub use types::{HarvestConfig, HarvestEvent, HarvestReport, PlannedDownload};

/// Service running the bulk-download pipeline.
pub struct HarvestService {
    client: PortalClient,
    config: HarvestConfig,
}

impl HarvestService {
    /// Create a new harvest service.
    pub fn new(client: PortalClient, config: HarvestConfig) -> Self {
        Self { client, config }
    }

    /// Harvest every document of the given projects into the output
    /// directory. Files are named `{project_id}_{sanitized filename}`.
    pub async fn harvest(
        &self,
        projects: &[Project],
        event_tx: mpsc::Sender<HarvestEvent>,
    ) -> anyhow::Result<HarvestReport> {
        let mut report = HarvestReport::default();

        let plan = self.build_plan(projects, &mut report, &event_tx).await;
        let _ = event_tx
            .send(HarvestEvent::PlanReady {
                total_documents: plan.len(),
            })
            .await;

        if plan.is_empty() {
            return Ok(report);
        }

        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        let delay = Duration::from_millis(self.config.download_delay_ms);

        for item in &plan {
            let filename = format!(
                "{}_{}",
                item.project_id,
                sanitize_filename(&item.doc.filename)
            );

            match self.download_one(&item.doc.download_url, &filename).await {
                Ok(bytes) => {
                    report.downloaded += 1;
                    let _ = event_tx
                        .send(HarvestEvent::DocumentDownloaded { filename, bytes })
                        .await;
                }
                Err(e) => {
                    warn!("Failed to download {}: {}", item.doc.download_url, e);
                    report.failed += 1;
                    let _ = event_tx
                        .send(HarvestEvent::DocumentFailed {
                            filename,
                            error: e.to_string(),
                        })
                        .await;
                }
            }

            tokio::time::sleep(delay).await;
        }

        Ok(report)
    }

    /// Discovery pass: resolve procedure links and document lists for every
    /// project into a flat download plan. Failed procedures are skipped.
    async fn build_plan(
        &self,
        projects: &[Project],
        report: &mut HarvestReport,
        event_tx: &mpsc::Sender<HarvestEvent>,
    ) -> Vec<PlannedDownload> {
        let mut plan = Vec::new();

        for project in projects {
            let _ = event_tx
                .send(HarvestEvent::ProjectStarted {
                    project_id: project.id.clone(),
                    title: project.title.clone(),
                })
                .await;

            let links = match self.client.procedure_links(&project.url).await {
                Ok(links) => links,
                Err(e) => {
                    warn!("Skipping project {}: {}", project.id, e);
                    report.failed += 1;
                    continue;
                }
            };
            report.projects += 1;

            for procedure_url in links {
                match self.client.document_list(&procedure_url).await {
                    Ok(list) => {
                        debug!(
                            "Planned {} document(s) from {}",
                            list.docs.len(),
                            procedure_url
                        );
                        report.procedures += 1;
                        plan.extend(list.docs.into_iter().map(|doc| PlannedDownload {
                            project_id: project.id.clone(),
                            doc,
                        }));
                    }
                    Err(e) => {
                        warn!("Skipping procedure {}: {}", procedure_url, e);
                        report.failed += 1;
                        let _ = event_tx
                            .send(HarvestEvent::ProcedureFailed {
                                procedure_url,
                                error: e.to_string(),
                            })
                            .await;
                    }
                }
            }
        }

        plan
    }

    /// Fetch one document and stream it into the output directory.
    async fn download_one(&self, url: &str, filename: &str) -> anyhow::Result<u64> {
        let response = self.client.fetch_document(url).await?;

        let path = self.config.output_dir.join(filename);
        let mut file = tokio::fs::File::create(&path).await?;
        let mut stream = response.into_inner().bytes_stream();
        let mut size = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            size += chunk.len() as u64;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(size)
    }
}
