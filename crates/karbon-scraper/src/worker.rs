//! Pagination loop for one (site, category, subcategory) task.
//!
//! `FetchPage → ExtractListings → (EmitRecords | SkipPage) → NextPage | Done`
//!
//! Pages run strictly in sequence. A page that fails to load or query is
//! skipped and never retried; a listing that fails to read or parse is
//! skipped without affecting the rest of its page.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use karbon_core::{AdapterKind, PriceParsePolicy, SiteConfig, TaskSpec};

use crate::adapters::{scan_page, PageScan};
use crate::browser::Browser;
use crate::collector::RecordSink;
use crate::error::{ListingError, PageError};
use crate::normalize::normalize_listing;
use crate::report::{DiagnosticKind, TaskReport};

/// State shared by every task of one site.
pub(crate) struct SiteContext {
    pub(crate) site: SiteConfig,
    /// Set when a task hits a price-parse failure under
    /// [`PriceParsePolicy::HaltSite`]; sibling tasks stop before their next page.
    pub(crate) halt: AtomicBool,
}

impl SiteContext {
    pub(crate) fn new(site: SiteConfig) -> Self {
        Self {
            site,
            halt: AtomicBool::new(false),
        }
    }

    fn is_halted(&self) -> bool {
        self.halt.load(Ordering::Acquire)
    }
}

enum PageFlow {
    Continue,
    Halt,
}

/// Walks every page of `task`, streaming records into `sink`.
///
/// Always returns a report; no page or listing failure ends the run.
pub(crate) async fn run_task<B: Browser>(
    browser: Arc<B>,
    ctx: Arc<SiteContext>,
    task: TaskSpec,
    sink: RecordSink,
) -> TaskReport {
    let site = &ctx.site;
    let mut report = TaskReport::new(task.clone());

    for page_index in 0..site.max_pages {
        if ctx.is_halted() {
            tracing::warn!(page = page_index + 1, "site halted; stopping task");
            report.halted = true;
            break;
        }

        if page_index > 0 && site.inter_page_delay_ms > 0 {
            tokio::time::sleep(site.inter_page_delay()).await;
        }

        let url = site.page_url(&task, page_index);
        report.pages_attempted += 1;
        tracing::debug!(page = page_index + 1, url = %url, "fetching page");

        let scan = match fetch_and_scan(browser.as_ref(), site.adapter, &url, site.timeout()).await
        {
            Ok(scan) => scan,
            Err(err) => {
                let kind = if err.is_query_failure() {
                    DiagnosticKind::QueryFailure
                } else {
                    DiagnosticKind::NavigationFailure
                };
                tracing::warn!(page = page_index + 1, url = %url, error = %err, "skipping page");
                report.pages_skipped += 1;
                report.diagnose(page_index, None, kind, err.to_string());
                continue;
            }
        };

        if scan.is_empty() {
            tracing::warn!(page = page_index + 1, url = %url, "no listings matched; skipping page");
            report.pages_skipped += 1;
            report.diagnose(
                page_index,
                None,
                DiagnosticKind::QueryFailure,
                format!("no listings matched on {url}"),
            );
            if site.stop_on_empty_page {
                break;
            }
            continue;
        }

        report.pages_scraped += 1;
        tracing::debug!(page = page_index + 1, listings = scan.len(), "extracted listings");

        if let PageFlow::Halt = emit_page(&ctx, &sink, &mut report, page_index, scan) {
            ctx.halt.store(true, Ordering::Release);
            report.halted = true;
            tracing::error!(
                page = page_index + 1,
                "price parse failure under halt_site policy; halting site"
            );
            break;
        }
    }

    tracing::info!(
        pages_scraped = report.pages_scraped,
        pages_skipped = report.pages_skipped,
        records = report.records_emitted,
        listings_skipped = report.listings_skipped,
        "task finished"
    );
    report
}

/// Loads one page under `timeout` and runs the site's adapter over it.
///
/// The page never outlives this call, so it is not held across any later
/// suspension point of the task.
async fn fetch_and_scan<B: Browser>(
    browser: &B,
    adapter: AdapterKind,
    url: &str,
    timeout: Duration,
) -> Result<PageScan, PageError> {
    let page = tokio::time::timeout(timeout, browser.navigate(url, timeout))
        .await
        .map_err(|_| PageError::Timeout {
            url: url.to_owned(),
            timeout_secs: timeout.as_secs(),
        })??;
    scan_page(adapter, &page)
}

fn emit_page(
    ctx: &SiteContext,
    sink: &RecordSink,
    report: &mut TaskReport,
    page_index: u32,
    scan: PageScan,
) -> PageFlow {
    let site = &ctx.site;

    for (listing_index, listing) in scan.into_iter().enumerate() {
        let outcome = listing.and_then(|raw| normalize_listing(raw, &site.store, &site.base_url));

        let err = match outcome {
            Ok(record) => {
                if sink.emit(record) {
                    report.records_emitted += 1;
                } else {
                    tracing::debug!("collector gone; record dropped");
                }
                continue;
            }
            Err(err) => err,
        };

        let kind = match err {
            ListingError::PriceParse { .. } => DiagnosticKind::PriceParseFailure,
            ListingError::Query(_) => DiagnosticKind::QueryFailure,
            ListingError::MissingField { .. } => DiagnosticKind::FragmentShapeMismatch,
        };
        tracing::warn!(
            page = page_index + 1,
            listing = listing_index,
            error = %err,
            "skipping listing"
        );
        report.listings_skipped += 1;
        report.diagnose(page_index, Some(listing_index), kind, err.to_string());

        if kind == DiagnosticKind::PriceParseFailure
            && site.price_parse_policy == PriceParsePolicy::HaltSite
        {
            return PageFlow::Halt;
        }
    }

    PageFlow::Continue
}
