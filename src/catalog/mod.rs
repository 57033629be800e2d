//! Listing-page harvesting: HTTP fetch, markup parsing, field parsing.

pub mod client;
pub mod fields;
pub mod models;
pub mod parser;
pub mod resolve;
pub mod selectors;

pub use client::{CatalogClient, CatalogFetch};
pub use models::{DetailRecord, Field, ListingPage, ListingRecord};
pub use parser::parse_listing;
