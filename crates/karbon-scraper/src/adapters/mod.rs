//! Hand-written listing mappings, one per retailer layout.
//!
//! Each adapter names the selector that isolates one listing on a page and
//! maps named sub-queries within that listing to [`RawListing`] fields.

mod ace;
mod cvs;
mod safeway;

use karbon_core::AdapterKind;

use crate::browser::{Fragment, RenderedPage};
use crate::error::{ListingError, PageError};
use crate::types::RawListing;

pub use ace::Ace;
pub use cvs::Cvs;
pub use safeway::Safeway;

/// Maps one retailer's listing markup to a [`RawListing`].
pub trait ListingAdapter {
    /// Selects every listing fragment on a page.
    const LISTING: &'static str;

    /// Reads one listing.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError`] if a required node is absent or blank.
    fn read_listing<F: Fragment>(listing: &F) -> Result<RawListing, ListingError>;
}

/// Per-listing results for one page, in document order.
pub type PageScan = Vec<Result<RawListing, ListingError>>;

/// Runs the adapter for `kind` over `page`.
///
/// A malformed listing yields an `Err` entry without affecting its
/// neighbours.
///
/// # Errors
///
/// Returns [`PageError::Query`] if the listing selector itself fails.
pub fn scan_page<P: RenderedPage>(kind: AdapterKind, page: &P) -> Result<PageScan, PageError> {
    match kind {
        AdapterKind::Ace => scan::<Ace, P>(page),
        AdapterKind::Cvs => scan::<Cvs, P>(page),
        AdapterKind::Safeway => scan::<Safeway, P>(page),
    }
}

fn scan<A: ListingAdapter, P: RenderedPage>(page: &P) -> Result<PageScan, PageError> {
    let listings = page.query_all(A::LISTING)?;
    Ok(listings.iter().map(A::read_listing).collect())
}

fn required_text<F: Fragment>(
    listing: &F,
    selector: &str,
    field: &'static str,
) -> Result<String, ListingError> {
    optional_text(listing, selector)?.ok_or(ListingError::MissingField { field })
}

/// Trimmed text of the first match; `None` when absent or blank.
fn optional_text<F: Fragment>(listing: &F, selector: &str) -> Result<Option<String>, ListingError> {
    Ok(listing
        .query_first(selector)?
        .map(|node| node.text().trim().to_owned())
        .filter(|text| !text.is_empty()))
}

fn optional_attr<F: Fragment>(
    listing: &F,
    selector: &str,
    attribute: &str,
) -> Result<Option<String>, ListingError> {
    Ok(listing
        .query_first(selector)?
        .and_then(|node| node.attribute(attribute)))
}
