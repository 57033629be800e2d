//! Rendered product-page enrichment via WebDriver.

pub mod extractor;
pub mod locators;

pub use extractor::{first_match, DetailExtractor, DetailFields, ExtractDetails, FieldSource};
