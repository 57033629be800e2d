//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Named catalog categories (name -> base URL). Enumerated once at
    /// the CLI boundary; the pipeline itself only ever sees a base URL.
    #[serde(default = "default_categories")]
    pub categories: BTreeMap<String, String>,

    /// Number of listing pages to request before stopping.
    #[serde(default = "default_pages")]
    pub pages: u32,

    /// Base delay between listing requests in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value).
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// Proxy URL (e.g., socks5://host:port).
    #[serde(default)]
    pub proxy: Option<String>,

    /// WebDriver endpoint used for rendered product pages.
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Navigation/readiness timeout for rendered pages, in seconds.
    #[serde(default = "default_nav_timeout_secs")]
    pub nav_timeout_secs: u64,

    /// Run the browser headless.
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Concurrent detail extractions. 1 means fully sequential;
    /// anything above is clamped to a small bounded pool.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Output path for the listing dataset.
    #[serde(default = "default_listing_out")]
    pub listing_out: PathBuf,

    /// Output path for the enriched detail dataset.
    #[serde(default = "default_details_out")]
    pub details_out: PathBuf,
}

fn default_categories() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "ruang_tamu_keluarga".to_string(),
            "https://www.tokopedia.com/p/rumah-tangga/ruang-tamu-keluarga".to_string(),
        ),
        (
            "tempat_penyimpanan".to_string(),
            "https://www.tokopedia.com/p/rumah-tangga/tempat-penyimpanan".to_string(),
        ),
        (
            "elektronik_dapur".to_string(),
            "https://www.tokopedia.com/p/elektronik/elektronik-dapur".to_string(),
        ),
        (
            "elektronik_rumah_tangga".to_string(),
            "https://www.tokopedia.com/p/elektronik/elektronik-rumah-tangga".to_string(),
        ),
    ])
}

fn default_pages() -> u32 {
    5
}

fn default_delay_ms() -> u64 {
    2000
}

fn default_delay_jitter_ms() -> u64 {
    3000
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_nav_timeout_secs() -> u64 {
    30
}

fn default_headless() -> bool {
    true
}

fn default_concurrency() -> usize {
    1
}

fn default_listing_out() -> PathBuf {
    PathBuf::from("scraped_urls.csv")
}

fn default_details_out() -> PathBuf {
    PathBuf::from("scraped_details.csv")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            pages: default_pages(),
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            proxy: None,
            webdriver_url: default_webdriver_url(),
            nav_timeout_secs: default_nav_timeout_secs(),
            headless: default_headless(),
            concurrency: default_concurrency(),
            listing_out: default_listing_out(),
            details_out: default_details_out(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("toko-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(webdriver) = std::env::var("TOKO_WEBDRIVER") {
            self.webdriver_url = webdriver;
        }

        if let Ok(proxy) = std::env::var("TOKO_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("TOKO_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(pages) = std::env::var("TOKO_PAGES") {
            if let Ok(p) = pages.parse() {
                self.pages = p;
            }
        }

        self
    }

    /// Looks up a configured category's base URL.
    pub fn category_url(&self, name: &str) -> Result<&str> {
        self.categories.get(name).map(String::as_str).with_context(|| {
            format!(
                "Unknown category '{}'. Configured: {}",
                name,
                self.categories.keys().cloned().collect::<Vec<_>>().join(", ")
            )
        })
    }

    /// Effective detail-extraction concurrency, clamped to the bounded
    /// pool the target site can tolerate.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.clamp(1, 5)
    }
}
