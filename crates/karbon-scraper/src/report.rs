//! Per-task, per-site and per-run outcome summaries.
//!
//! Reports travel back up the join tree (task → site → run); records travel
//! separately through the result queue.

use chrono::{DateTime, Utc};
use karbon_core::{ProductRecord, TaskSpec};

/// Category of a skipped unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Page fetch timed out or failed; page skipped.
    NavigationFailure,
    /// Listing selector failed on a loaded page; page skipped.
    QueryFailure,
    /// A listing lacked a required node; listing skipped.
    FragmentShapeMismatch,
    /// A listing's price could not be parsed; listing skipped.
    PriceParseFailure,
    /// The task itself ended abnormally (panic or cancellation).
    TaskFailure,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DiagnosticKind::NavigationFailure => "navigation_failure",
            DiagnosticKind::QueryFailure => "query_failure",
            DiagnosticKind::FragmentShapeMismatch => "fragment_shape_mismatch",
            DiagnosticKind::PriceParseFailure => "price_parse_failure",
            DiagnosticKind::TaskFailure => "task_failure",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub task: TaskSpec,
    pub page_index: Option<u32>,
    /// Position of the listing on its page, for listing-level diagnostics.
    pub listing_index: Option<usize>,
    pub kind: DiagnosticKind,
    pub message: String,
}

/// What one task worker did.
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub task: TaskSpec,
    pub pages_attempted: u32,
    pub pages_scraped: u32,
    pub pages_skipped: u32,
    pub records_emitted: usize,
    pub listings_skipped: usize,
    /// Stopped early because its site was halted by the price-parse policy.
    pub halted: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl TaskReport {
    #[must_use]
    pub fn new(task: TaskSpec) -> Self {
        Self {
            task,
            pages_attempted: 0,
            pages_scraped: 0,
            pages_skipped: 0,
            records_emitted: 0,
            listings_skipped: 0,
            halted: false,
            diagnostics: Vec::new(),
        }
    }

    /// Report for a task whose worker never returned normally.
    #[must_use]
    pub fn failed(task: TaskSpec, message: String) -> Self {
        let mut report = Self::new(task.clone());
        report.diagnostics.push(Diagnostic {
            task,
            page_index: None,
            listing_index: None,
            kind: DiagnosticKind::TaskFailure,
            message,
        });
        report
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::TaskFailure)
    }

    pub(crate) fn diagnose(
        &mut self,
        page_index: u32,
        listing_index: Option<usize>,
        kind: DiagnosticKind,
        message: String,
    ) {
        self.diagnostics.push(Diagnostic {
            task: self.task.clone(),
            page_index: Some(page_index),
            listing_index,
            kind,
            message,
        });
    }
}

#[derive(Debug, Clone)]
pub struct SiteReport {
    pub site: String,
    pub tasks: Vec<TaskReport>,
}

impl SiteReport {
    #[must_use]
    pub fn records_emitted(&self) -> usize {
        self.tasks.iter().map(|t| t.records_emitted).sum()
    }

    #[must_use]
    pub fn pages_skipped(&self) -> u32 {
        self.tasks.iter().map(|t| t.pages_skipped).sum()
    }

    #[must_use]
    pub fn listings_skipped(&self) -> usize {
        self.tasks.iter().map(|t| t.listings_skipped).sum()
    }

    #[must_use]
    pub fn failed_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_failed()).count()
    }

    #[must_use]
    pub fn halted(&self) -> bool {
        self.tasks.iter().any(|t| t.halted)
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sites: Vec<SiteReport>,
}

impl RunReport {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.sites
            .iter()
            .flat_map(|s| s.tasks.iter())
            .flat_map(|t| t.diagnostics.iter())
    }

    #[must_use]
    pub fn records_emitted(&self) -> usize {
        self.sites.iter().map(SiteReport::records_emitted).sum()
    }
}

/// Everything a run produced: the collected records (unordered) and the
/// report tree.
#[derive(Debug)]
pub struct RunOutcome {
    pub records: Vec<ProductRecord>,
    pub report: RunReport,
}
