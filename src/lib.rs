//! toko-crawler - Two-stage Tokopedia catalog scraper
//!
//! Harvests paginated listing pages over plain HTTP (with TLS
//! fingerprint emulation), then enriches each product through a
//! rendered WebDriver session, persisting both stages as linked CSV
//! datasets.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod detail;
pub mod error;
pub mod pipeline;

pub use catalog::models::{DetailRecord, Field, ListingPage, ListingRecord};
pub use config::Config;
pub use error::ScrapeError;
