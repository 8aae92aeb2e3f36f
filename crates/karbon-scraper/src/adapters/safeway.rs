use super::{optional_attr, required_text, ListingAdapter};
use crate::browser::Fragment;
use crate::error::ListingError;
use crate::types::RawListing;

/// Safeway aisle listings.
pub struct Safeway;

impl ListingAdapter for Safeway {
    const LISTING: &'static str = ".product-item-inner";

    fn read_listing<F: Fragment>(listing: &F) -> Result<RawListing, ListingError> {
        let name = required_text(listing, "a.product-title", "name")?;
        // Out-of-stock cards render without a price node.
        let price_text = required_text(listing, ".product-price", "price")?;

        Ok(RawListing {
            name,
            url: optional_attr(listing, "a.product-title", "href")?,
            image_url: optional_attr(listing, "img", "src")?,
            price_text,
            original_price_text: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use karbon_core::AdapterKind;

    use crate::adapters::scan_page;
    use crate::client::HtmlPage;
    use crate::error::ListingError;
    use crate::normalize::parse_price;

    const PAGE: &str = r#"
<div class="product-item-inner">
  <div class="container">
    <div class="product-price-con"><span class="product-price" id="pp-1">Your Price
$3.99 each</span></div>
  </div>
  <a class="product-title" href="/shop/product-details.960012345.html">Signature SELECT Paper Towels</a>
</div>
<div class="product-item-inner">
  <div class="container"><div class="product-price-con"></div></div>
  <a class="product-title" href="/shop/product-details.960099999.html">Out Of Stock Sponge</a>
</div>
"#;

    #[test]
    fn reads_multi_line_price_block() {
        let page = HtmlPage::parse(PAGE);
        let scan = scan_page(AdapterKind::Safeway, &page).unwrap();
        let first = scan[0].as_ref().unwrap();
        assert_eq!(first.name, "Signature SELECT Paper Towels");
        assert_eq!(parse_price(&first.price_text).unwrap().to_string(), "3.99");
    }

    #[test]
    fn out_of_stock_card_is_shape_mismatch() {
        let page = HtmlPage::parse(PAGE);
        let scan = scan_page(AdapterKind::Safeway, &page).unwrap();
        assert_eq!(scan.len(), 2);
        assert!(matches!(
            scan[1],
            Err(ListingError::MissingField { field: "price" })
        ));
    }
}
