use super::{optional_attr, optional_text, required_text, ListingAdapter};
use crate::browser::Fragment;
use crate::error::ListingError;
use crate::types::RawListing;

/// Ace Hardware department listings.
pub struct Ace;

impl ListingAdapter for Ace {
    const LISTING: &'static str = ".mz-productlisting";

    fn read_listing<F: Fragment>(listing: &F) -> Result<RawListing, ListingError> {
        let name = required_text(listing, ".mz-productlisting-title", "name")?;
        let price_text = required_text(listing, ".sales-price, .custom-price", "price")?;

        Ok(RawListing {
            name,
            url: optional_attr(listing, "a.mz-productlisting-title", "href")?,
            image_url: optional_attr(listing, ".mz-productlisting-image img", "src")?,
            price_text,
            original_price_text: optional_text(listing, ".is-crossedout")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use karbon_core::AdapterKind;

    use crate::adapters::scan_page;
    use crate::client::HtmlPage;
    use crate::error::ListingError;

    const PAGE: &str = r#"
<div class="mz-productlist">
  <div class="mz-productlisting">
    <div class="mz-productlisting-image"><a href="/p/2385458"><img src="//images.acehardware.com/2385458.jpg"></a></div>
    <div class="mz-productlisting-info">
      <a class="mz-productlisting-title" href="/departments/tools/dewalt/2385458">DEWALT 20V MAX Drill</a>
      <div class="mz-pricestack">
        <span class="mz-price is-crossedout">$129.00</span>
        <span class="sales-price">$99.99</span>
      </div>
    </div>
  </div>
  <div class="mz-productlisting">
    <div class="mz-productlisting-info">
      <a class="mz-productlisting-title" href="/departments/tools/dewalt/2385460">DEWALT Bit Set</a>
      <div class="mz-pricestack"><span class="custom-price">$19.999</span></div>
    </div>
  </div>
  <div class="mz-productlisting">
    <div class="mz-productlisting-info">
      <a class="mz-productlisting-title" href="/departments/tools/dewalt/2385461">DEWALT Case</a>
      <div class="mz-pricestack"></div>
    </div>
  </div>
</div>
"#;

    #[test]
    fn reads_every_field_by_name() {
        let page = HtmlPage::parse(PAGE);
        let scan = scan_page(AdapterKind::Ace, &page).unwrap();
        assert_eq!(scan.len(), 3);

        let first = scan[0].as_ref().unwrap();
        assert_eq!(first.name, "DEWALT 20V MAX Drill");
        assert_eq!(
            first.url.as_deref(),
            Some("/departments/tools/dewalt/2385458")
        );
        assert_eq!(
            first.image_url.as_deref(),
            Some("//images.acehardware.com/2385458.jpg")
        );
        assert_eq!(first.price_text, "$99.99");
        assert_eq!(first.original_price_text.as_deref(), Some("$129.00"));
    }

    #[test]
    fn custom_price_is_accepted_and_image_is_optional() {
        let page = HtmlPage::parse(PAGE);
        let scan = scan_page(AdapterKind::Ace, &page).unwrap();
        let second = scan[1].as_ref().unwrap();
        assert_eq!(second.price_text, "$19.999");
        assert!(second.image_url.is_none());
        assert!(second.original_price_text.is_none());
    }

    #[test]
    fn listing_without_price_node_is_shape_mismatch() {
        let page = HtmlPage::parse(PAGE);
        let scan = scan_page(AdapterKind::Ace, &page).unwrap();
        assert!(matches!(
            scan[2],
            Err(ListingError::MissingField { field: "price" })
        ));
    }
}
