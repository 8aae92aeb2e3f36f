//! Run-level fan-out: one driver per site, one worker per task.
//!
//! Records stream from workers into a single result queue while reports
//! travel back up the join tree. The orchestrator drops its own sink once
//! every driver has been spawned, so the queue closes exactly when the last
//! worker finishes and the collector's drain returns.

use std::sync::Arc;

use chrono::Utc;
use karbon_core::{SiteConfig, TaskSpec};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::browser::Browser;
use crate::collector::{result_queue, RecordSink};
use crate::report::{RunOutcome, RunReport, SiteReport, TaskReport};
use crate::worker::{run_task, SiteContext};

/// Drives a full scrape over a set of sites with a shared browser.
pub struct Orchestrator<B: Browser> {
    browser: Arc<B>,
    max_concurrent_tasks: usize,
}

impl<B: Browser> Orchestrator<B> {
    /// `max_concurrent_tasks` caps in-flight task workers across all sites.
    /// Zero is treated as one.
    #[must_use]
    pub fn new(browser: B, max_concurrent_tasks: usize) -> Self {
        Self {
            browser: Arc::new(browser),
            max_concurrent_tasks: max_concurrent_tasks.max(1),
        }
    }

    /// Scrapes every task of every site and returns once all of them have
    /// finished and the result queue has been drained.
    ///
    /// Never fails: page, listing and task failures are recorded in the
    /// returned report.
    pub async fn run(&self, sites: Vec<SiteConfig>) -> RunOutcome {
        let started_at = Utc::now();
        let (sink, collector) = result_queue();
        let permits = Arc::new(Semaphore::new(self.max_concurrent_tasks));

        tracing::info!(
            sites = sites.len(),
            max_concurrent_tasks = self.max_concurrent_tasks,
            "starting scrape run"
        );

        let drivers: Vec<(String, JoinHandle<SiteReport>)> = sites
            .into_iter()
            .map(|site| {
                let name = site.name.clone();
                let handle = tokio::spawn(drive_site(
                    Arc::clone(&self.browser),
                    site,
                    sink.clone(),
                    Arc::clone(&permits),
                ));
                (name, handle)
            })
            .collect();
        drop(sink);

        let (records, sites) = tokio::join!(collector.drain(), join_sites(drivers));

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            sites,
        };

        let diagnostics = report.diagnostics().count();
        tracing::info!(
            records = records.len(),
            diagnostics,
            elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
            "scrape run finished"
        );

        RunOutcome { records, report }
    }
}

async fn join_sites(drivers: Vec<(String, JoinHandle<SiteReport>)>) -> Vec<SiteReport> {
    let mut reports = Vec::with_capacity(drivers.len());
    for (name, handle) in drivers {
        let report = match handle.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(site = %name, error = %e, "site driver failed");
                let task = TaskSpec {
                    site: name.clone(),
                    category: "*".to_owned(),
                    subcategory: "*".to_owned(),
                };
                SiteReport {
                    site: name,
                    tasks: vec![TaskReport::failed(task, e.to_string())],
                }
            }
        };
        reports.push(report);
    }
    reports
}

/// Spawns one worker per task of `site` and joins them all.
async fn drive_site<B: Browser>(
    browser: Arc<B>,
    site: SiteConfig,
    sink: RecordSink,
    permits: Arc<Semaphore>,
) -> SiteReport {
    let ctx = Arc::new(SiteContext::new(site));
    let tasks = ctx.site.tasks();
    tracing::info!(site = %ctx.site.name, tasks = tasks.len(), "starting site");

    let workers: Vec<(TaskSpec, JoinHandle<TaskReport>)> = tasks
        .into_iter()
        .map(|task| {
            let browser = Arc::clone(&browser);
            let ctx = Arc::clone(&ctx);
            let sink = sink.clone();
            let permits = Arc::clone(&permits);
            let spec = task.clone();
            let span = tracing::info_span!(
                "task",
                site = %task.site,
                category = %task.category,
                subcategory = %task.subcategory,
            );
            let handle = tokio::spawn(
                async move {
                    // Never closed, so acquire cannot fail in practice.
                    let _permit = permits.acquire_owned().await.ok();
                    run_task(browser, ctx, spec, sink).await
                }
                .instrument(span),
            );
            (task, handle)
        })
        .collect();
    drop(sink);

    let mut reports = Vec::with_capacity(workers.len());
    for (task, handle) in workers {
        let report = match handle.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(task = %task, error = %e, "task worker failed");
                TaskReport::failed(task, e.to_string())
            }
        };
        reports.push(report);
    }

    let report = SiteReport {
        site: ctx.site.name.clone(),
        tasks: reports,
    };
    tracing::info!(
        site = %report.site,
        records = report.records_emitted(),
        pages_skipped = report.pages_skipped(),
        listings_skipped = report.listings_skipped(),
        failed_tasks = report.failed_tasks(),
        halted = report.halted(),
        "site finished"
    );
    report
}
