use super::{optional_attr, required_text, ListingAdapter};
use crate::browser::Fragment;
use crate::error::ListingError;
use crate::types::RawListing;

/// CVS shop category listings.
///
/// Each tile is an anchor, so the product link is the listing's own `href`.
pub struct Cvs;

impl ListingAdapter for Cvs {
    const LISTING: &'static str = "a.r-1lz4bg0";

    fn read_listing<F: Fragment>(listing: &F) -> Result<RawListing, ListingError> {
        let name = required_text(listing, ".r-ubezar", "name")?;
        let price_text = required_text(listing, ".r-ttdzmv", "price")?;

        Ok(RawListing {
            name,
            url: listing.attribute("href"),
            image_url: optional_attr(listing, "img", "src")?,
            price_text,
            original_price_text: None,
        })
    }
}
