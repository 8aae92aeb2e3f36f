//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use karbon_core::{
    AdapterKind, ClosingHour, Coordinates, PriceParsePolicy, SiteConfig, StoreInfo,
};

/// A Safeway-layout site whose listing URLs live under `origin`.
pub fn site(name: &str, origin: &str, categories: &[(&str, &[&str])], max_pages: u32) -> SiteConfig {
    SiteConfig {
        name: name.to_owned(),
        adapter: AdapterKind::Safeway,
        base_url: origin.to_owned(),
        url_template: format!("{origin}/shop/aisles/{{category}}/{{subcategory}}.3132.html?page={{page}}"),
        page_size: 48,
        max_pages,
        timeout_secs: 1,
        inter_page_delay_ms: 0,
        stop_on_empty_page: false,
        price_parse_policy: PriceParsePolicy::Skip,
        store: StoreInfo {
            name: format!("{name} store"),
            phone: "(925) 935-9205".to_owned(),
            address: "600 S Broadway, Walnut Creek, CA 94596".to_owned(),
            coordinates: Coordinates {
                latitude: 37.898_1,
                longitude: -122.056_698,
            },
            closing_hour: ClosingHour::Text("Open 24 hours".to_owned()),
        },
        categories: categories
            .iter()
            .map(|(category, subs)| {
                (
                    (*category).to_owned(),
                    subs.iter().map(|s| (*s).to_owned()).collect(),
                )
            })
            .collect::<BTreeMap<_, _>>(),
    }
}

/// One Safeway listing card. `None` renders the card without a price node.
pub fn listing(name: &str, price: Option<&str>) -> String {
    let price = price
        .map(|p| format!(r#"<span class="product-price">Your Price {p} each</span>"#))
        .unwrap_or_default();
    format!(
        r#"<div class="product-item-inner">
  <div class="product-price-con">{price}</div>
  <a class="product-title" href="/shop/product-details.{slug}.html">{name}</a>
  <img src="https://images.example.test/{slug}.jpg">
</div>"#,
        slug = name.to_lowercase().replace(' ', "-"),
    )
}

pub fn page(listings: &[String]) -> String {
    format!(
        "<html><body><div class=\"grid\">{}</div></body></html>",
        listings.join("\n")
    )
}
