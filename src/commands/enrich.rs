//! Enrich command: detail stage over an existing listing dataset.

use crate::config::Config;
use crate::detail::extractor::{DetailExtractor, ExtractDetails};
use crate::pipeline::writer::read_listing;
use crate::pipeline::{LogProgress, Pipeline};
use anyhow::{Context, Result};
use tracing::info;

/// Reads the listing dataset in full and writes the detail dataset.
pub struct EnrichCommand {
    config: Config,
}

impl EnrichCommand {
    /// Creates a new enrich command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Enriches using a WebDriver-backed extractor.
    pub async fn execute(&self) -> Result<String> {
        let extractor = DetailExtractor::new(&self.config);
        self.execute_with_extractor(&extractor).await
    }

    /// Enriches with a provided extractor (for testing).
    pub async fn execute_with_extractor(&self, extractor: &impl ExtractDetails) -> Result<String> {
        let listings = read_listing(&self.config.listing_out)
            .context("Run the harvest stage first to produce the listing dataset")?;

        info!("Enriching {} listings", listings.len());

        let mut pipeline = Pipeline::new(&self.config, LogProgress);
        let details = pipeline.enrich(extractor, &listings).await?;

        Ok(format!(
            "Enriched {} products into {}",
            details.len(),
            self.config.details_out.display()
        ))
    }
}
