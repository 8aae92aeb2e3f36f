//! Normalization from [`RawListing`] to [`karbon_core::ProductRecord`].
//!
//! Prices are parsed with exact decimal arithmetic and truncated to two
//! fraction digits, so `"$3.999"` becomes `3.99` and `"0.29"` stays `0.29`.

use std::str::FromStr;

use karbon_core::{Price, ProductRecord, StoreInfo};
use rust_decimal::Decimal;

use crate::client::resolve_link;
use crate::error::ListingError;
use crate::types::RawListing;

/// Stand-in for links a site does not expose, matching the legacy export.
pub const MISSING_LINK: &str = "NA";

const PRICE_DIGITS: u8 = 2;

/// Parses a listing price such as `"$3.99"`, `"3.99"`, `"$1,299.00"` or
/// `"Your Price\n$3.99 each"`.
///
/// With a currency symbol, the amount is the number immediately following
/// the first `$`; surrounding text is ignored. Without one, the whole
/// trimmed string must be the amount. Thousands separators are accepted.
///
/// # Errors
///
/// Returns [`ListingError::PriceParse`] for empty, non-numeric or negative
/// input.
pub fn parse_price(raw: &str) -> Result<Price, ListingError> {
    let fail = |reason: String| ListingError::PriceParse {
        raw: raw.to_owned(),
        reason,
    };

    let trimmed = raw.trim();
    let amount = match trimmed.find('$') {
        Some(pos) => {
            if trimmed[..pos].trim_end().ends_with('-') {
                return Err(fail("negative amount".to_owned()));
            }
            leading_amount(trimmed[pos + 1..].trim_start())
        }
        None => trimmed,
    };

    if amount.is_empty() {
        return Err(fail("no amount found".to_owned()));
    }

    let value = parse_amount(amount).map_err(fail)?;
    Price::truncated(value).ok_or_else(|| fail("negative amount".to_owned()))
}

/// Parses `1234`, `1,234.5` or `.99` into a decimal with at most two fraction
/// digits. Extra fraction digits are cut as text, so nothing past the cent is
/// ever rounded.
fn parse_amount(amount: &str) -> Result<Decimal, String> {
    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (amount, None),
    };

    let digits = whole_digits(whole).ok_or_else(|| format!("malformed amount \"{amount}\""))?;

    let cents = match fraction {
        None => "",
        Some(f) if !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()) => {
            &f[..f.len().min(usize::from(PRICE_DIGITS))]
        }
        Some(_) => return Err(format!("malformed fraction in \"{amount}\"")),
    };

    if digits.is_empty() && cents.is_empty() {
        return Err("no digits".to_owned());
    }

    let whole = if digits.is_empty() { "0" } else { digits.as_str() };
    let text = if cents.is_empty() {
        whole.to_owned()
    } else {
        format!("{whole}.{cents}")
    };
    Decimal::from_str(&text).map_err(|e| e.to_string())
}

/// Integer digits with thousands separators removed. Commas must group
/// exactly three digits (`1,299`, not `1,2,3`).
fn whole_digits(whole: &str) -> Option<String> {
    let mut groups = whole.split(',');
    let first = groups.next().unwrap_or_default();
    if !first.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut digits = first.to_owned();
    for group in groups {
        if first.is_empty() || first.len() > 3 || group.len() != 3 {
            return None;
        }
        if !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

/// The run of amount characters at the start of `s`.
fn leading_amount(s: &str) -> &str {
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, ',' | '.' | '-')))
        .unwrap_or(s.len());
    &s[..end]
}

/// Normalizes one [`RawListing`] into a [`ProductRecord`] for `store`.
///
/// Relative links are resolved against `base_url`. A missing or unparseable
/// "was" price falls back to the in-store price.
///
/// # Errors
///
/// - [`ListingError::MissingField`] if the name is blank.
/// - [`ListingError::PriceParse`] if the in-store price cannot be parsed.
pub fn normalize_listing(
    raw: RawListing,
    store: &StoreInfo,
    base_url: &str,
) -> Result<ProductRecord, ListingError> {
    let product_name = collapse_whitespace(&raw.name);
    if product_name.is_empty() {
        return Err(ListingError::MissingField { field: "name" });
    }

    let in_store_price = parse_price(&raw.price_text)?;

    let original_price = match raw.original_price_text.as_deref() {
        Some(text) if !text.trim().is_empty() => parse_price(text).unwrap_or_else(|err| {
            tracing::debug!(product = %product_name, error = %err, "ignoring unparseable original price");
            in_store_price
        }),
        _ => in_store_price,
    };

    let link = |href: Option<&str>| {
        href.and_then(|h| resolve_link(base_url, h))
            .unwrap_or_else(|| MISSING_LINK.to_owned())
    };

    Ok(ProductRecord {
        product_url: link(raw.url.as_deref()),
        product_image_url: link(raw.image_url.as_deref()),
        product_name,
        in_store_price,
        original_price,
        store_name: store.name.clone(),
        phone_number: store.phone.clone(),
        address: store.address.clone(),
        store_coordinates: store.coordinates,
        closing_hour: store.closing_hour.clone(),
    })
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
