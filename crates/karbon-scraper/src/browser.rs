//! Capability seam over the page-rendering engine.
//!
//! Task workers only ever see these traits: navigate to a URL under a
//! deadline, then run named CSS selector queries against the result. Nothing
//! addresses a node by child position.
//!
//! [`crate::client::HttpBrowser`] implements the seam for server-rendered
//! pages; a JavaScript-capable browser plugs in by implementing the same
//! traits.

use std::future::Future;
use std::time::Duration;

use crate::error::PageError;

/// Loads pages. Shared by every task of every site, so it must be cheap to
/// use concurrently.
pub trait Browser: Send + Sync + 'static {
    type Page: RenderedPage;

    /// Loads `url`, giving up after `timeout`.
    ///
    /// Callers also enforce `timeout` externally, so an implementation that
    /// ignores it still cannot stall a task.
    fn navigate(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<Self::Page, PageError>> + Send;
}

/// A fully loaded page.
pub trait RenderedPage {
    type Fragment<'a>: Fragment
    where
        Self: 'a;

    /// All elements matching `selector`, in document order. Empty when
    /// nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Query`] if the selector cannot be evaluated.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Fragment<'_>>, PageError>;
}

/// Read-only handle to one element of a rendered page.
pub trait Fragment: Sized {
    /// First descendant matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Query`] if the selector cannot be evaluated.
    fn query_first(&self, selector: &str) -> Result<Option<Self>, PageError>;

    /// All descendants matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Query`] if the selector cannot be evaluated.
    fn query_all(&self, selector: &str) -> Result<Vec<Self>, PageError>;

    /// Value of attribute `name` on this element, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Concatenated text of the element and its descendants.
    fn text(&self) -> String;
}
