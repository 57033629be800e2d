//! Data models for harvested listings and enriched product details.

use serde::{Serialize, Serializer};

/// Sentinel text written to the datasets for missing values.
pub const UNKNOWN: &str = "unknown";

/// A field that was either extracted or is explicitly unknown.
///
/// The source site conflates "element absent", "element empty", and
/// "parse failed"; all three collapse into `Unknown` here so the
/// datasets never carry half-parsed strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<T> {
    Present(T),
    Unknown,
}

impl<T> Field<T> {
    /// Returns true if no value was extracted.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Field::Unknown)
    }

    /// Converts to an `Option`, discarding the sentinel.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Present(v) => Some(v),
            Field::Unknown => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Field::Present(v),
            None => Field::Unknown,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Present(v) => v.fmt(f),
            Field::Unknown => f.write_str(UNKNOWN),
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Present(v) => v.serialize(serializer),
            Field::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

impl Field<u64> {
    /// Parses a dataset cell back into a numeric field.
    ///
    /// The sentinel text (and anything else non-numeric) reads as `Unknown`.
    pub fn parse_cell(cell: &str) -> Self {
        cell.trim().parse::<u64>().map(Field::Present).unwrap_or(Field::Unknown)
    }
}

/// One row of the listing dataset, produced during the harvest stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRecord {
    /// Product name, or the sentinel when the card carried none.
    pub name: String,
    /// Price in the displayed currency unit.
    pub price: Field<u64>,
    /// Canonical product URL, already resolved out of the tracking link.
    pub product_url: String,
}

/// One row of the detail dataset: a listing augmented with fields that
/// only exist on the rendered product page.
///
/// Name and price are carried over from the listing verbatim, never
/// re-derived from the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRecord {
    pub name: String,
    pub price: Field<u64>,
    pub stock_sold: Field<u64>,
    pub seller_name: Field<String>,
    pub product_url: String,
}

impl DetailRecord {
    /// Joins a listing with the fields read from its rendered page.
    pub fn from_listing(
        listing: &ListingRecord,
        stock_sold: Field<u64>,
        seller_name: Field<String>,
    ) -> Self {
        Self {
            name: listing.name.clone(),
            price: listing.price,
            stock_sold,
            seller_name,
            product_url: listing.product_url.clone(),
        }
    }
}

/// Parse result for a single listing page. Ephemeral: lives only for
/// the duration of one fetch, never persisted.
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Records extracted from the page's product cards.
    pub records: Vec<ListingRecord>,
    /// True when the page carried zero product cards, which signals
    /// pagination exhaustion.
    pub terminal: bool,
}

impl ListingPage {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}
