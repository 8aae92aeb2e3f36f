pub mod adapters;
pub mod browser;
pub mod client;
pub mod collector;
pub mod error;
pub mod normalize;
pub mod orchestrator;
pub mod report;
pub mod types;
mod worker;

pub use adapters::{scan_page, ListingAdapter, PageScan};
pub use browser::{Browser, Fragment, RenderedPage};
pub use client::{HtmlFragment, HtmlPage, HttpBrowser};
pub use collector::{result_queue, Collector, RecordSink};
pub use error::{ListingError, PageError, ScraperError};
pub use normalize::{normalize_listing, parse_price, MISSING_LINK};
pub use orchestrator::Orchestrator;
pub use report::{Diagnostic, DiagnosticKind, RunOutcome, RunReport, SiteReport, TaskReport};
pub use types::RawListing;
