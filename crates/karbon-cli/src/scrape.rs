//! Command handlers for `scrape` and `sites`.
//!
//! A scrape run itself never fails: skipped pages, listings and tasks are
//! summarized on stdout and logged. Only configuration, client setup and
//! writing the export can return an error.

use std::path::Path;

use karbon_core::{AppConfig, ProductRecord};
use karbon_scraper::{HttpBrowser, Orchestrator, RunReport};

/// Scrape the selected sites and write every collected record to
/// `output_path` as a single JSON array.
///
/// # Errors
///
/// Returns an error if the site table cannot be loaded, a `site_filter`
/// name is unknown, the HTTP client cannot be built, or the export cannot
/// be written.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    sites_path: &Path,
    output_path: &Path,
    site_filter: &[String],
) -> anyhow::Result<()> {
    let sites_file = karbon_core::load_sites(sites_path)?;
    let sites = sites_file.select(site_filter)?;

    let browser = HttpBrowser::new(config.connect_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

    tracing::info!(
        env = %config.env,
        sites_path = %sites_path.display(),
        sites = sites.len(),
        "loaded site table"
    );

    let outcome = Orchestrator::new(browser, config.max_concurrent_tasks)
        .run(sites)
        .await;

    write_records(output_path, &outcome.records)?;
    print_summary(&outcome.report, outcome.records.len(), output_path);

    Ok(())
}

/// Validate the site table and print one line per task.
///
/// # Errors
///
/// Returns an error if the site table cannot be loaded or is invalid.
pub(crate) fn list_sites(sites_path: &Path) -> anyhow::Result<()> {
    let sites_file = karbon_core::load_sites(sites_path)?;
    for site in &sites_file.sites {
        let tasks = site.tasks();
        println!(
            "{} ({}): {} tasks, up to {} pages each, {}s per page",
            site.name,
            site.adapter,
            tasks.len(),
            site.max_pages,
            site.timeout_secs
        );
        for task in tasks {
            println!("  {task}  {}", site.page_url(&task, 0));
        }
    }
    Ok(())
}

/// Serialize `records` as a pretty-printed JSON array and write it in one go.
pub(crate) fn write_records(path: &Path, records: &[ProductRecord]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "wrote export");
    Ok(())
}

fn print_summary(report: &RunReport, records: usize, output_path: &Path) {
    for site in &report.sites {
        let halted = if site.halted() { " (halted)" } else { "" };
        println!(
            "{}: {} records, {} pages skipped, {} listings skipped, {} tasks failed{halted}",
            site.site,
            site.records_emitted(),
            site.pages_skipped(),
            site.listings_skipped(),
            site.failed_tasks()
        );
    }
    println!(
        "wrote {records} records to {} in {}s",
        output_path.display(),
        (report.finished_at - report.started_at).num_seconds()
    );
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
