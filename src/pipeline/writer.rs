//! CSV dataset writers and readers.
//!
//! Both datasets are append-targets with a single writer. Every row is
//! flushed as it is written so partial progress survives a mid-run
//! abort.

use crate::catalog::models::{DetailRecord, Field, ListingRecord, UNKNOWN};
use anyhow::{Context, Result};
use csv::{Reader, Writer};
use std::fs::File;
use std::path::Path;

/// Column order of the listing dataset.
pub const LISTING_HEADER: [&str; 3] = ["Product Name", "Price", "Product URL"];

/// Column order of the detail dataset.
pub const DETAIL_HEADER: [&str; 5] =
    ["Product Name", "Price", "Stock Sold", "Seller Name", "Product URL"];

/// Writer for the listing dataset.
pub struct ListingWriter {
    writer: Writer<File>,
}

impl ListingWriter {
    /// Creates (or truncates) the dataset and writes the header row.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut writer = Writer::from_path(path)
            .with_context(|| format!("Failed to create listing dataset: {}", path.display()))?;
        writer.write_record(LISTING_HEADER)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Appends one record and flushes it to disk.
    pub fn append(&mut self, record: &ListingRecord) -> Result<()> {
        let price = record.price.to_string();
        self.writer.write_record([
            record.name.as_str(),
            price.as_str(),
            record.product_url.as_str(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writer for the enriched detail dataset.
pub struct DetailWriter {
    writer: Writer<File>,
}

impl DetailWriter {
    /// Creates (or truncates) the dataset and writes the header row.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut writer = Writer::from_path(path)
            .with_context(|| format!("Failed to create detail dataset: {}", path.display()))?;
        writer.write_record(DETAIL_HEADER)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Appends one record and flushes it to disk.
    pub fn append(&mut self, record: &DetailRecord) -> Result<()> {
        let price = record.price.to_string();
        let stock_sold = record.stock_sold.to_string();
        let seller_name = record.seller_name.to_string();
        self.writer.write_record([
            record.name.as_str(),
            price.as_str(),
            stock_sold.as_str(),
            seller_name.as_str(),
            record.product_url.as_str(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads a listing dataset back in full, as the enrichment stage does
/// before writing the detail dataset.
pub fn read_listing(path: impl AsRef<Path>) -> Result<Vec<ListingRecord>> {
    let path = path.as_ref();
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open listing dataset: {}", path.display()))?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.context("Malformed row in listing dataset")?;
        records.push(ListingRecord {
            name: row.get(0).unwrap_or(UNKNOWN).to_string(),
            price: Field::parse_cell(row.get(1).unwrap_or("")),
            product_url: row.get(2).unwrap_or(UNKNOWN).to_string(),
        });
    }

    Ok(records)
}
