//! HTTP-backed [`Browser`] for server-rendered listing pages.

mod origin;
mod page;

use std::time::Duration;

use reqwest::Client;

use crate::browser::Browser;
use crate::error::{PageError, ScraperError};

pub use origin::{extract_origin, resolve_link};
pub use page::{HtmlFragment, HtmlPage};

/// Fetches listing pages over plain HTTP and exposes them through CSS
/// selector queries.
///
/// Non-2xx responses become [`PageError::UnexpectedStatus`]; elapsed
/// deadlines become [`PageError::Timeout`]. Nothing is retried: the task
/// worker skips the page instead.
pub struct HttpBrowser {
    client: Client,
}

impl HttpBrowser {
    /// Creates an `HttpBrowser` with the given connect timeout and `User-Agent`.
    ///
    /// The overall per-page deadline is supplied on every
    /// [`Browser::navigate`] call from the site configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(connect_timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Browser for HttpBrowser {
    type Page = HtmlPage;

    async fn navigate(&self, url: &str, timeout: Duration) -> Result<HtmlPage, PageError> {
        let referer = extract_origin(url);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::REFERER, &referer)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| classify(e, url, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify(e, url, timeout))?;

        Ok(HtmlPage::parse(&body))
    }
}

fn classify(err: reqwest::Error, url: &str, timeout: Duration) -> PageError {
    if err.is_timeout() {
        PageError::Timeout {
            url: url.to_owned(),
            timeout_secs: timeout.as_secs(),
        }
    } else {
        PageError::Http(err)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
