//! Per-product detail extraction against a rendered page.
//!
//! Listing markup is static HTML, but the product page is
//! client-rendered: sold counts and seller info only exist after the
//! scripts run. Each product gets its own WebDriver session (product
//! pages carry distinct client-side state), torn down on every exit
//! path so hundreds of products don't leak browser resources.

use crate::catalog::fields::parse_sold_count;
use crate::catalog::models::Field;
use crate::config::Config;
use crate::detail::locators;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fields recovered from one rendered product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFields {
    pub stock_sold: Field<u64>,
    pub seller_name: Field<String>,
}

impl DetailFields {
    /// Total-failure result: both fields unknown.
    pub fn unknown() -> Self {
        Self { stock_sold: Field::Unknown, seller_name: Field::Unknown }
    }
}

/// Capability to read a named field out of a rendered page.
///
/// Implementations return `None` for any miss: element absent, read
/// error, whatever. A miss is never an error, it just means "try the
/// next candidate".
#[async_trait]
pub trait FieldSource {
    async fn field_text(&self, locator: &str) -> Option<String>;
}

/// Applies an ordered locator chain against a page.
///
/// The first candidate that both resolves and yields non-empty text
/// wins; exhausting the chain is `Unknown`.
pub async fn first_match<S: FieldSource + ?Sized>(source: &S, chain: &[&str]) -> Field<String> {
    for locator in chain {
        match source.field_text(locator).await {
            Some(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    return Field::Present(text.to_string());
                }
                debug!("Locator matched but empty: {}", locator);
            }
            None => debug!("Locator missed: {}", locator),
        }
    }
    Field::Unknown
}

/// Trait for enriching a product URL - enables mocking for tests.
#[async_trait]
pub trait ExtractDetails: Send + Sync {
    /// Extracts detail fields for one product. Infallible by contract:
    /// any failure degrades to unknown fields.
    async fn extract(&self, product_url: &str) -> DetailFields;
}

/// WebDriver-backed detail extractor.
pub struct DetailExtractor {
    webdriver_url: String,
    nav_timeout: Duration,
    capabilities: serde_json::map::Map<String, serde_json::Value>,
}

impl DetailExtractor {
    /// Creates an extractor from configuration.
    pub fn new(config: &Config) -> Self {
        let mut capabilities = serde_json::map::Map::new();

        if config.headless {
            capabilities.insert(
                "goog:chromeOptions".to_string(),
                json!({ "args": ["--headless=new", "--disable-gpu"] }),
            );
            capabilities
                .insert("moz:firefoxOptions".to_string(), json!({ "args": ["-headless"] }));
        }

        Self {
            webdriver_url: config.webdriver_url.clone(),
            nav_timeout: Duration::from_secs(config.nav_timeout_secs),
            capabilities,
        }
    }

    /// Opens a fresh, isolated rendering session.
    async fn connect(&self) -> Result<Client> {
        ClientBuilder::rustls()
            .context("Failed to initialize TLS for WebDriver client")?
            .capabilities(self.capabilities.clone())
            .connect(&self.webdriver_url)
            .await
            .with_context(|| format!("Failed to connect to WebDriver at {}", self.webdriver_url))
    }

    /// Navigates and reads both fields from a connected session.
    async fn read_fields(&self, client: &Client, product_url: &str) -> Result<DetailFields> {
        client.goto(product_url).await.context("Navigation failed")?;

        // Dynamic content is client-rendered; wait for the minimal
        // ready signal before touching the DOM.
        client
            .wait()
            .at_most(self.nav_timeout)
            .for_element(Locator::Css("body"))
            .await
            .context("Page never became ready")?;

        let page = RenderedPage { client };

        let stock_sold = match page.field_text(locators::STOCK_SOLD).await {
            Some(text) => parse_sold_count(&text),
            None => Field::Unknown,
        };

        let seller_name = first_match(&page, locators::SELLER_NAME_CHAIN).await;

        Ok(DetailFields { stock_sold, seller_name })
    }
}

#[async_trait]
impl ExtractDetails for DetailExtractor {
    async fn extract(&self, product_url: &str) -> DetailFields {
        info!("Extracting details: {}", product_url);

        let client = match self.connect().await {
            Ok(client) => client,
            Err(e) => {
                warn!("{:#}", e);
                return DetailFields::unknown();
            }
        };

        let result = self.read_fields(&client, product_url).await;

        // Teardown happens whether extraction succeeded or not.
        if let Err(e) = client.close().await {
            debug!("WebDriver session close failed: {}", e);
        }

        match result {
            Ok(fields) => fields,
            Err(e) => {
                warn!("Detail extraction failed for {}: {:#}", product_url, e);
                DetailFields::unknown()
            }
        }
    }
}

/// A live rendered page behind a WebDriver session.
struct RenderedPage<'a> {
    client: &'a Client,
}

#[async_trait]
impl FieldSource for RenderedPage<'_> {
    async fn field_text(&self, locator: &str) -> Option<String> {
        let element = self.client.find(Locator::Css(locator)).await.ok()?;
        element.text().await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Page stub mapping locators to text.
    struct StubPage {
        fields: HashMap<&'static str, &'static str>,
    }

    impl StubPage {
        fn new(fields: &[(&'static str, &'static str)]) -> Self {
            Self { fields: fields.iter().copied().collect() }
        }
    }

    #[async_trait]
    impl FieldSource for StubPage {
        async fn field_text(&self, locator: &str) -> Option<String> {
            self.fields.get(locator).map(|s| s.to_string())
        }
    }

    #[tokio::test]
    async fn test_first_match_first_candidate() {
        let page = StubPage::new(&[(locators::SELLER_NAME_CHAIN[0], "Toko Pertama")]);
        let result = first_match(&page, locators::SELLER_NAME_CHAIN).await;
        assert_eq!(result, Field::Present("Toko Pertama".to_string()));
    }

    #[tokio::test]
    async fn test_first_match_third_candidate() {
        let page = StubPage::new(&[(locators::SELLER_NAME_CHAIN[2], "Toko Ketiga")]);
        let result = first_match(&page, locators::SELLER_NAME_CHAIN).await;
        assert_eq!(result, Field::Present("Toko Ketiga".to_string()));
    }

    #[tokio::test]
    async fn test_first_match_declared_order_wins() {
        let page = StubPage::new(&[
            (locators::SELLER_NAME_CHAIN[1], "Kedua"),
            (locators::SELLER_NAME_CHAIN[2], "Ketiga"),
        ]);
        let result = first_match(&page, locators::SELLER_NAME_CHAIN).await;
        assert_eq!(result, Field::Present("Kedua".to_string()));
    }

    #[tokio::test]
    async fn test_first_match_all_miss_is_unknown() {
        let page = StubPage::new(&[]);
        let result = first_match(&page, locators::SELLER_NAME_CHAIN).await;
        assert_eq!(result, Field::Unknown);
    }

    #[tokio::test]
    async fn test_first_match_empty_text_tries_next() {
        let page = StubPage::new(&[
            (locators::SELLER_NAME_CHAIN[0], "   "),
            (locators::SELLER_NAME_CHAIN[1], "Toko Isi"),
        ]);
        let result = first_match(&page, locators::SELLER_NAME_CHAIN).await;
        assert_eq!(result, Field::Present("Toko Isi".to_string()));
    }

    #[tokio::test]
    async fn test_first_match_trims_text() {
        let page = StubPage::new(&[(locators::SELLER_NAME_CHAIN[0], "  Toko Rapi \n")]);
        let result = first_match(&page, locators::SELLER_NAME_CHAIN).await;
        assert_eq!(result, Field::Present("Toko Rapi".to_string()));
    }

    #[test]
    fn test_detail_fields_unknown() {
        let fields = DetailFields::unknown();
        assert!(fields.stock_sold.is_unknown());
        assert!(fields.seller_name.is_unknown());
    }

    #[test]
    fn test_extractor_headless_capabilities() {
        let config = Config::default();
        let extractor = DetailExtractor::new(&config);
        assert!(extractor.capabilities.contains_key("goog:chromeOptions"));

        let mut config = Config::default();
        config.headless = false;
        let extractor = DetailExtractor::new(&config);
        assert!(extractor.capabilities.is_empty());
    }
}
