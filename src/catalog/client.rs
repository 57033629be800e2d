//! HTTP client for listing pages using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::error::ScrapeError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Desktop browser identification sent with every listing fetch.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Trait for fetching one listing page at a time - enables mocking for tests.
#[async_trait]
pub trait CatalogFetch: Send + Sync {
    /// Fetches the raw HTML for the given page index (1-based).
    async fn fetch_page(&self, page: u32) -> Result<String, ScrapeError>;

    /// Returns the catalog base URL this fetcher is bound to.
    fn base_url(&self) -> &str;
}

/// Catalog HTTP client with browser impersonation and anti-bot measures.
pub struct CatalogClient {
    client: Client,
    base_url: String,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl CatalogClient {
    /// Creates a new client bound to a catalog base URL.
    pub fn new(config: &Config, base_url: impl Into<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// Adds a random delay to mimic human behavior.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl CatalogFetch for CatalogClient {
    async fn fetch_page(&self, page: u32) -> Result<String, ScrapeError> {
        self.delay().await;

        let url = format!("{}?page={}", self.base_url, page);
        info!("Fetching listing page {}", page);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .emulation(Emulation::Chrome131)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", "id-ID,id;q=0.9,en;q=0.8")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            warn!("Listing page {} failed with status {}", page, status);
            return Err(ScrapeError::Status(status.as_u16()));
        }

        response.text().await.map_err(ScrapeError::from)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config() -> Config {
        Config { delay_ms: 0, delay_jitter_ms: 0, ..Config::default() }
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        let mock_server = MockServer::start().await;

        let html = r#"
            <html><body>
                <a class="css-54k5sq" href="https://www.tokopedia.com/toko/rak">
                    <span class="css-20kt3o">Rak Dinding</span>
                </a>
            </body></html>
        "#;

        Mock::given(method("GET"))
            .and(path("/p/rumah-tangga/ruang-tamu-keluarga"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&mock_server)
            .await;

        let config = make_test_config();
        let base = format!("{}/p/rumah-tangga/ruang-tamu-keluarga", mock_server.uri());
        let client = CatalogClient::new(&config, base).unwrap();

        let body = client.fetch_page(1).await.unwrap();
        assert!(body.contains("Rak Dinding"));
    }

    #[tokio::test]
    async fn test_fetch_page_sends_page_param() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/catalog"))
            .and(query_param("page", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>page 7</html>"))
            .mount(&mock_server)
            .await;

        let config = make_test_config();
        let client =
            CatalogClient::new(&config, format!("{}/catalog", mock_server.uri())).unwrap();

        let body = client.fetch_page(7).await.unwrap();
        assert!(body.contains("page 7"));
    }

    #[tokio::test]
    async fn test_fetch_page_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/catalog"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let config = make_test_config();
        let client =
            CatalogClient::new(&config, format!("{}/catalog", mock_server.uri())).unwrap();

        let result = client.fetch_page(1).await;
        assert!(matches!(result, Err(ScrapeError::Status(503))));
    }

    #[tokio::test]
    async fn test_fetch_page_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/catalog"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let config = make_test_config();
        let client =
            CatalogClient::new(&config, format!("{}/catalog", mock_server.uri())).unwrap();

        let result = client.fetch_page(3).await;
        assert!(matches!(result, Err(ScrapeError::Status(404))));
    }

    #[tokio::test]
    async fn test_fetch_page_sends_user_agent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/catalog"))
            .and(wiremock::matchers::header("User-Agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;

        let config = make_test_config();
        let client =
            CatalogClient::new(&config, format!("{}/catalog", mock_server.uri())).unwrap();

        assert!(client.fetch_page(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_base_url_accessor() {
        let config = make_test_config();
        let client = CatalogClient::new(&config, "http://localhost/catalog").unwrap();
        assert_eq!(client.base_url(), "http://localhost/catalog");
    }
}
