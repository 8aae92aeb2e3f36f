//! [`RenderedPage`] / [`Fragment`] over a parsed HTML document.

use scraper::{ElementRef, Html, Selector};

use crate::browser::{Fragment, RenderedPage};
use crate::error::PageError;

/// A parsed HTML document.
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    /// Parses a full HTML document. Parsing is lenient and never fails;
    /// malformed markup simply yields fewer matches.
    #[must_use]
    pub fn parse(body: &str) -> Self {
        Self {
            document: Html::parse_document(body),
        }
    }
}

impl RenderedPage for HtmlPage {
    type Fragment<'a> = HtmlFragment<'a>;

    fn query_all(&self, selector: &str) -> Result<Vec<HtmlFragment<'_>>, PageError> {
        let selector = compile(selector)?;
        Ok(self.document.select(&selector).map(HtmlFragment).collect())
    }
}

/// One element of an [`HtmlPage`].
#[derive(Clone, Copy)]
pub struct HtmlFragment<'a>(ElementRef<'a>);

impl Fragment for HtmlFragment<'_> {
    fn query_first(&self, selector: &str) -> Result<Option<Self>, PageError> {
        let selector = compile(selector)?;
        Ok(self.0.select(&selector).next().map(HtmlFragment))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Self>, PageError> {
        let selector = compile(selector)?;
        Ok(self.0.select(&selector).map(HtmlFragment).collect())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_owned)
    }

    fn text(&self) -> String {
        self.0.text().collect()
    }
}

fn compile(selector: &str) -> Result<Selector, PageError> {
    Selector::parse(selector).map_err(|e| PageError::Query {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}
