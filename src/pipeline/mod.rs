//! Two-stage pipeline orchestration.
//!
//! Stage machine: `Idle -> Harvesting(page) -> Enriching(item) -> Done`.
//! Harvesting walks listing pages in strictly increasing order until
//! the requested bound, a terminal (empty) page, or a transport error.
//! Enrichment then visits every harvested record; a single product's
//! failure never aborts the run.

pub mod writer;

use crate::catalog::client::CatalogFetch;
use crate::catalog::models::{DetailRecord, ListingRecord};
use crate::catalog::parser::parse_listing;
use crate::config::Config;
use crate::detail::extractor::ExtractDetails;
use crate::error::ScrapeError;
use anyhow::Result;
use futures::StreamExt;
use tracing::{info, warn};
use writer::{DetailWriter, ListingWriter};

/// Where the pipeline currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Harvesting { page: u32 },
    Enriching { item: usize },
    Done,
}

/// Observability surface: one callback per page or item event.
///
/// The message format is not a compatibility contract; sinks decide
/// how (and whether) to render each event.
pub trait Progress: Send + Sync {
    fn page_scraped(&self, page: u32, items: usize);
    fn pages_exhausted(&self, page: u32);
    fn page_failed(&self, page: u32, error: &ScrapeError);
    fn item_enriched(&self, index: usize, total: usize, record: &DetailRecord);
    fn completed(&self, listings: usize, details: usize);
}

/// Default progress sink: one tracing line per event.
pub struct LogProgress;

impl Progress for LogProgress {
    fn page_scraped(&self, page: u32, items: usize) {
        info!("Scraped page {} ({} items)", page, items);
    }

    fn pages_exhausted(&self, page: u32) {
        info!("No more products found on page {}", page);
    }

    fn page_failed(&self, page: u32, error: &ScrapeError) {
        warn!("Stopping pagination at page {}: {}", page, error);
    }

    fn item_enriched(&self, index: usize, total: usize, record: &DetailRecord) {
        info!("[{}/{}] {} (seller: {})", index, total, record.name, record.seller_name);
    }

    fn completed(&self, listings: usize, details: usize) {
        info!("Scraping completed: {} listings, {} detail rows", listings, details);
    }
}

/// Counts reported at the end of a full run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub listings: usize,
    pub details: usize,
}

/// Drives harvest and enrichment over the configured datasets.
pub struct Pipeline<'a, P: Progress> {
    config: &'a Config,
    progress: P,
    stage: Stage,
}

impl<'a, P: Progress> Pipeline<'a, P> {
    pub fn new(config: &'a Config, progress: P) -> Self {
        Self { config, progress, stage: Stage::Idle }
    }

    /// Current pipeline stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Stage 1: walks listing pages 1..=pages, appending records to the
    /// listing dataset as each page completes.
    ///
    /// A transport failure stops pagination but is not fatal to the
    /// run: everything harvested so far is returned for enrichment.
    pub async fn harvest(&mut self, fetcher: &impl CatalogFetch) -> Result<Vec<ListingRecord>> {
        let mut writer = ListingWriter::create(&self.config.listing_out)?;
        let mut harvested = Vec::new();

        for page in 1..=self.config.pages {
            self.stage = Stage::Harvesting { page };

            let html = match fetcher.fetch_page(page).await {
                Ok(html) => html,
                Err(e) => {
                    self.progress.page_failed(page, &e);
                    break;
                }
            };

            let parsed = parse_listing(&html);
            if parsed.terminal {
                self.progress.pages_exhausted(page);
                break;
            }

            for record in &parsed.records {
                writer.append(record)?;
            }
            self.progress.page_scraped(page, parsed.count());
            harvested.extend(parsed.records);
        }

        Ok(harvested)
    }

    /// Stage 2: extracts details for every listing, appending each
    /// detail row as it completes.
    ///
    /// With concurrency above 1 a small bounded pool of extractions
    /// runs in flight; `buffered` keeps completion order equal to
    /// listing order and this single consumer does all the writes, so
    /// one task's failure never touches its siblings.
    pub async fn enrich<E: ExtractDetails>(
        &mut self,
        extractor: &E,
        listings: &[ListingRecord],
    ) -> Result<Vec<DetailRecord>> {
        let mut writer = DetailWriter::create(&self.config.details_out)?;
        let total = listings.len();
        let concurrency = self.config.effective_concurrency();

        let mut results = futures::stream::iter(listings.iter().map(|listing| async move {
            let fields = extractor.extract(&listing.product_url).await;
            (listing, fields)
        }))
        .buffered(concurrency);

        let mut details = Vec::with_capacity(total);
        while let Some((listing, fields)) = results.next().await {
            let index = details.len() + 1;
            self.stage = Stage::Enriching { item: index };

            let record = DetailRecord::from_listing(listing, fields.stock_sold, fields.seller_name);
            writer.append(&record)?;
            self.progress.item_enriched(index, total, &record);
            details.push(record);
        }

        Ok(details)
    }

    /// Runs both stages in sequence and reports the final counts.
    pub async fn run(
        &mut self,
        fetcher: &impl CatalogFetch,
        extractor: &impl ExtractDetails,
    ) -> Result<RunSummary> {
        let listings = self.harvest(fetcher).await?;
        let details = self.enrich(extractor, &listings).await?;

        self.stage = Stage::Done;
        self.progress.completed(listings.len(), details.len());

        Ok(RunSummary { listings: listings.len(), details: details.len() })
    }
}
