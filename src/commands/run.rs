//! Run command: full two-stage pipeline.

use crate::catalog::client::{CatalogClient, CatalogFetch};
use crate::config::Config;
use crate::detail::extractor::{DetailExtractor, ExtractDetails};
use crate::pipeline::{LogProgress, Pipeline};
use anyhow::{Context, Result};

/// Harvests a catalog and enriches every harvested listing.
pub struct RunCommand {
    config: Config,
}

impl RunCommand {
    /// Creates a new run command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs both stages against `base_url` and returns a summary.
    pub async fn execute(&self, base_url: &str) -> Result<String> {
        let client = CatalogClient::new(&self.config, base_url)
            .context("Failed to create HTTP client")?;
        let extractor = DetailExtractor::new(&self.config);

        self.execute_with(&client, &extractor).await
    }

    /// Runs both stages with provided collaborators (for testing).
    pub async fn execute_with(
        &self,
        fetcher: &impl CatalogFetch,
        extractor: &impl ExtractDetails,
    ) -> Result<String> {
        let mut pipeline = Pipeline::new(&self.config, LogProgress);
        let summary = pipeline.run(fetcher, extractor).await?;

        Ok(format!(
            "Scraping completed. {} listings -> {}, {} detail rows -> {}",
            summary.listings,
            self.config.listing_out.display(),
            summary.details,
            self.config.details_out.display()
        ))
    }
}
