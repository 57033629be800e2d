//! toko-crawler - Two-stage Tokopedia catalog scraper
//!
//! Harvests listing pages over HTTP, then enriches each product via a
//! rendered WebDriver session, writing both stages to CSV datasets.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toko_crawler::commands::{EnrichCommand, HarvestCommand, RunCommand};
use toko_crawler::config::Config;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "toko-crawler",
    version,
    about = "Two-stage Tokopedia catalog scraper",
    long_about = "Harvests paginated catalog listings into a CSV dataset, then enriches \
                  every product with sold counts and seller names read from the rendered \
                  product page."
)]
struct Cli {
    /// Number of listing pages to scrape
    #[arg(short, long, global = true, env = "TOKO_PAGES")]
    pages: Option<u32>,

    /// Delay between listing requests in milliseconds
    #[arg(long, global = true, env = "TOKO_DELAY")]
    delay: Option<u64>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "TOKO_PROXY")]
    proxy: Option<String>,

    /// WebDriver endpoint for rendered product pages
    #[arg(long, global = true, env = "TOKO_WEBDRIVER")]
    webdriver: Option<String>,

    /// Concurrent detail extractions (clamped to 1-5)
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// Output path for the listing dataset
    #[arg(long, global = true)]
    listing_out: Option<PathBuf>,

    /// Output path for the detail dataset
    #[arg(long, global = true)]
    details_out: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest listings and enrich every product (both stages)
    #[command(alias = "r")]
    Run {
        /// Base catalog URL to scrape
        #[arg(long, conflicts_with = "category")]
        url: Option<String>,

        /// Configured category name to scrape
        #[arg(long)]
        category: Option<String>,
    },

    /// Harvest listing pages only (stage 1)
    #[command(alias = "h")]
    Harvest {
        /// Base catalog URL to scrape
        #[arg(long, conflicts_with = "category")]
        url: Option<String>,

        /// Configured category name to scrape
        #[arg(long)]
        category: Option<String>,
    },

    /// Enrich an existing listing dataset (stage 2)
    #[command(alias = "e")]
    Enrich,

    /// List configured categories
    Categories,
}

/// Picks the catalog base URL from an explicit URL or a category name.
fn resolve_base_url(
    config: &Config,
    url: Option<String>,
    category: Option<String>,
) -> Result<String> {
    if let Some(url) = url {
        return Ok(url);
    }
    if let Some(name) = category {
        return Ok(config.category_url(&name)?.to_string());
    }
    anyhow::bail!("Provide either --url or --category (see `categories` for configured names)")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(pages) = cli.pages {
        config.pages = pages;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(webdriver) = cli.webdriver {
        config.webdriver_url = webdriver;
    }
    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(listing_out) = cli.listing_out {
        config.listing_out = listing_out;
    }
    if let Some(details_out) = cli.details_out {
        config.details_out = details_out;
    }

    match cli.command {
        Commands::Run { url, category } => {
            let base_url = resolve_base_url(&config, url, category)?;
            let cmd = RunCommand::new(config);
            let output = cmd.execute(&base_url).await?;
            println!("{}", output);
        }

        Commands::Harvest { url, category } => {
            let base_url = resolve_base_url(&config, url, category)?;
            let cmd = HarvestCommand::new(config);
            let output = cmd.execute(&base_url).await?;
            println!("{}", output);
        }

        Commands::Enrich => {
            let cmd = EnrichCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::Categories => {
            println!("Configured categories:\n");
            println!("{:<28} {}", "Name", "Base URL");
            println!("{:-<28} {:-<60}", "", "");

            for (name, url) in &config.categories {
                println!("{:<28} {}", name, url);
            }
        }
    }

    Ok(())
}
