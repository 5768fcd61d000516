//! Portal search command.

use console::style;

use crate::config::Settings;
use crate::portal::PortalClient;

/// Run one search against the portal and print the results.
pub async fn cmd_search(
    settings: &Settings,
    keyword: &str,
    page: u32,
    status: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let client = PortalClient::new(settings.portal.clone())?;
    let results = client.search(keyword, page, status).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.projects.is_empty() {
        println!("{} No projects found for {:?}", style("✗").red(), keyword);
        return Ok(());
    }

    for project in &results.projects {
        println!(
            "{} {} {}",
            style(&project.id).cyan(),
            style(&project.title).bold(),
            style(format!("[{}]", project.status)).dim()
        );
        println!("  {} — {}", project.proponent, project.url);
    }
    println!(
        "\nPage {} of {} ({} project(s) on this page)",
        results.current_page, results.total_pages, results.total
    );

    Ok(())
}
