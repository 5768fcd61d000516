//! Bulk harvest command.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use crate::config::Settings;
use crate::models::Project;
use crate::portal::PortalClient;
use crate::services::harvest::{HarvestConfig, HarvestEvent, HarvestService};

/// Search the portal and download every document of the matching projects.
pub async fn cmd_harvest(
    settings: &Settings,
    keyword: &str,
    status: Option<&str>,
    pages: u32,
    limit: usize,
) -> anyhow::Result<()> {
    let client = PortalClient::new(settings.portal.clone())?;
    let projects = collect_projects(&client, keyword, status, pages, limit).await?;

    if projects.is_empty() {
        println!("{} No projects found for {:?}", style("✗").red(), keyword);
        return Ok(());
    }

    println!(
        "{} Harvesting {} project(s) into {}",
        style("→").cyan(),
        projects.len(),
        settings.harvest.output_dir.display()
    );

    let service = HarvestService::new(
        client,
        HarvestConfig {
            output_dir: settings.harvest.output_dir.clone(),
            download_delay_ms: settings.harvest.download_delay_ms,
        },
    );

    let (event_tx, event_rx) = mpsc::channel(64);
    let renderer = tokio::spawn(render_events(event_rx));

    let report = service.harvest(&projects, event_tx).await?;
    let _ = renderer.await;

    println!(
        "{} Downloaded {} document(s) from {} procedure(s), {} failed",
        style("✓").green(),
        report.downloaded,
        report.procedures,
        report.failed
    );

    Ok(())
}

/// Walk search result pages until the requested page or project limit.
async fn collect_projects(
    client: &PortalClient,
    keyword: &str,
    status: Option<&str>,
    pages: u32,
    limit: usize,
) -> anyhow::Result<Vec<Project>> {
    let mut projects = Vec::new();
    let mut page = 1u32;

    loop {
        let results = client.search(keyword, page, status).await?;
        let total_pages = results.total_pages;
        projects.extend(results.projects);

        if limit > 0 && projects.len() >= limit {
            projects.truncate(limit);
            break;
        }
        if page >= total_pages || (pages > 0 && page >= pages) {
            break;
        }
        page += 1;
    }

    Ok(projects)
}

/// Render harvest events as a progress bar.
async fn render_events(mut event_rx: mpsc::Receiver<HarvestEvent>) {
    let mut bar: Option<ProgressBar> = None;

    while let Some(event) = event_rx.recv().await {
        match event {
            HarvestEvent::ProjectStarted { title, .. } => {
                println!("  {} {}", style("→").cyan(), title);
            }
            HarvestEvent::PlanReady { total_documents } => {
                let pb = ProgressBar::new(total_documents as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                        )
                        .unwrap()
                        .progress_chars("#>-"),
                );
                bar = Some(pb);
            }
            HarvestEvent::DocumentDownloaded { filename, .. } => {
                if let Some(pb) = &bar {
                    pb.set_message(filename);
                    pb.inc(1);
                }
            }
            HarvestEvent::DocumentFailed { filename, error } => {
                let line = format!("  {} {}: {}", style("✗").red(), filename, error);
                match &bar {
                    Some(pb) => pb.println(line),
                    None => println!("{line}"),
                }
                if let Some(pb) = &bar {
                    pb.inc(1);
                }
            }
            HarvestEvent::ProcedureFailed {
                procedure_url,
                error,
            } => {
                println!(
                    "  {} {}: {}",
                    style("✗").red(),
                    procedure_url,
                    error
                );
            }
        }
    }

    if let Some(pb) = bar {
        pb.finish_with_message("done");
    }
}
