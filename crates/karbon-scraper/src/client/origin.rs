//! URL helpers shared by the HTTP browser and listing normalization.

/// Extracts the scheme+host origin from a page URL.
///
/// Given `"https://www.cvs.com/shop/household/hardware?page=2"`, returns
/// `"https://www.cvs.com"`. Used as the `Referer` for listing requests.
#[must_use]
pub fn extract_origin(url: &str) -> String {
    reqwest::Url::parse(url).map_or_else(
        |e| {
            tracing::warn!(
                url,
                error = %e,
                "could not parse url; falling back to string split for origin"
            );
            url.trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

/// Resolves a link scraped from a listing against the site's base URL.
///
/// Handles absolute (`https://...`), protocol-relative (`//img.example/x.jpg`)
/// and root-relative (`/shop/p/123`) forms. Returns `None` for blank links.
/// If `base_url` itself is unparseable the trimmed link is returned as-is.
#[must_use]
pub fn resolve_link(base_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let resolved = reqwest::Url::parse(base_url)
        .and_then(|base| base.join(href))
        .map_or_else(|_| href.to_owned(), |u| u.to_string());
    Some(resolved)
}
