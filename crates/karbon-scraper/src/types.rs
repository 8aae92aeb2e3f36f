//! Raw listing shape produced by site adapters.
//!
//! ## Observed listing shapes
//!
//! ### Ace Hardware
//! One `.mz-productlisting` per product. The title anchor carries both name
//! and link; the image `src` is protocol-relative (`//images...`). Listings
//! without a `.sales-price`/`.custom-price` node are "see price in cart"
//! items and cannot be recorded.
//!
//! ### CVS
//! Product tiles are anchors whose own `href` is the product link, with
//! atomic-CSS class names for the title and price. Links are root-relative.
//! No image URL is exposed in the server-rendered tile.
//!
//! ### Safeway
//! The price block reads like `"Your Price\n$3.99 each"`; only the first
//! currency amount matters. Out-of-stock cards have no price node at all.

/// Field text pulled from one listing fragment, before normalization.
///
/// Only `name` and `price_text` are required; everything else degrades to
/// a placeholder or falls back to another field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawListing {
    pub name: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub price_text: String,
    /// Crossed-out "was" price, when the site shows one.
    pub original_price_text: Option<String>,
}
