use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of fraction digits every [`Price`] carries.
pub const PRICE_SCALE: u32 = 2;

/// A product scraped from one retailer listing, joined with the metadata of
/// the store it was scraped for.
///
/// Field names match the JSON export consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_name: String,
    pub product_url: String,
    pub product_image_url: String,
    pub in_store_price: Price,
    /// Pre-discount price; equal to `in_store_price` when the listing shows
    /// no separate "was" price.
    pub original_price: Price,
    pub store_name: String,
    pub phone_number: String,
    pub address: String,
    #[serde(with = "coordinates_pair")]
    pub store_coordinates: Coordinates,
    pub closing_hour: ClosingHour,
}

/// Non-negative monetary amount with exactly two fraction digits.
///
/// Construction truncates toward zero, never rounds: `3.999` becomes `3.99`.
/// Serializes as a decimal string (`"3.99"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Truncates `value` to two fraction digits. Returns `None` for negative
    /// amounts.
    #[must_use]
    pub fn truncated(value: Decimal) -> Option<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return None;
        }
        let mut cents = value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::ToZero);
        // Pad "3" or "3.5" out to "3.00" / "3.50"; never reduces precision here.
        cents.rescale(PRICE_SCALE);
        cents.set_sign_positive(true);
        Some(Self(cents))
    }

    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Price::truncated(value)
            .ok_or_else(|| serde::de::Error::custom(format!("negative price: {value}")))
    }
}

/// Geographic position of a store.
///
/// The canonical ordering everywhere in this workspace is latitude first.
/// Configuration files use named fields; the product export uses a
/// `[latitude, longitude]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

// Coordinates come from validated config, never NaN, so bitwise equality is
// a total equivalence and records can live in hash sets.
impl Eq for Coordinates {}

impl std::hash::Hash for Coordinates {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // `+ 0.0` folds -0.0 into 0.0 so equal values hash equally.
        (self.latitude + 0.0).to_bits().hash(state);
        (self.longitude + 0.0).to_bits().hash(state);
    }
}

mod coordinates_pair {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Coordinates;

    pub fn serialize<S: Serializer>(c: &Coordinates, serializer: S) -> Result<S::Ok, S::Error> {
        [c.latitude, c.longitude].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Coordinates, D::Error> {
        let [latitude, longitude] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}

/// When a store closes: a time of day (`"19:00"`) or free text such as
/// `"Open 24 hours"`. Both forms serialize as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClosingHour {
    At(NaiveTime),
    Text(String),
}

impl FromStr for ClosingHour {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map_or_else(|_| ClosingHour::Text(trimmed.to_string()), ClosingHour::At))
    }
}

impl fmt::Display for ClosingHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClosingHour::At(time) => write!(f, "{}", time.format("%H:%M")),
            ClosingHour::Text(text) => f.write_str(text),
        }
    }
}

impl Serialize for ClosingHour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClosingHour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(hour) = raw.parse::<ClosingHour>();
        Ok(hour)
    }
}
