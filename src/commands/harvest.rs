//! Harvest command: listing stage only.

use crate::catalog::client::{CatalogClient, CatalogFetch};
use crate::config::Config;
use crate::pipeline::{LogProgress, Pipeline};
use anyhow::{Context, Result};
use tracing::info;

/// Harvests listing pages into the listing dataset.
pub struct HarvestCommand {
    config: Config,
}

impl HarvestCommand {
    /// Creates a new harvest command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Harvests the catalog at `base_url` and returns a summary line.
    pub async fn execute(&self, base_url: &str) -> Result<String> {
        let client = CatalogClient::new(&self.config, base_url)
            .context("Failed to create HTTP client")?;

        self.execute_with_fetcher(&client).await
    }

    /// Harvests with a provided fetcher (for testing).
    pub async fn execute_with_fetcher(&self, fetcher: &impl CatalogFetch) -> Result<String> {
        info!("Harvesting catalog: {}", fetcher.base_url());

        let mut pipeline = Pipeline::new(&self.config, LogProgress);
        let listings = pipeline.harvest(fetcher).await?;

        Ok(format!(
            "Harvested {} listings into {}",
            listings.len(),
            self.config.listing_out.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct StaticFetcher {
        pages: Vec<String>,
    }

    #[async_trait]
    impl CatalogFetch for StaticFetcher {
        async fn fetch_page(&self, page: u32) -> Result<String, ScrapeError> {
            Ok(self
                .pages
                .get((page - 1) as usize)
                .cloned()
                .unwrap_or_else(|| "<html></html>".to_string()))
        }

        fn base_url(&self) -> &str {
            "http://mock.test/catalog"
        }
    }

    #[tokio::test]
    async fn test_harvest_command_writes_dataset() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.pages = 3;
        config.listing_out = dir.path().join("urls.csv");

        let fetcher = StaticFetcher {
            pages: vec![
                r#"<html><a class="css-54k5sq" href="https://www.tokopedia.com/a/1">
                    <span class="css-20kt3o">Satu</span>
                    <span class="css-o5uqvq">Rp5.000</span>
                </a></html>"#
                    .to_string(),
            ],
        };

        let cmd = HarvestCommand::new(config.clone());
        let summary = cmd.execute_with_fetcher(&fetcher).await.unwrap();

        assert!(summary.contains("Harvested 1 listings"));
        let csv = std::fs::read_to_string(&config.listing_out).unwrap();
        assert!(csv.contains("Satu,5000,https://www.tokopedia.com/a/1"));
    }
}
