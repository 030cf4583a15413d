//! Crawl coordinator - main harvest orchestration logic
//!
//! Walks the search result pages in order, visits every product card of a
//! page one at a time, and hands the collected records to the exporter.
//! Requests never overlap; a randomized pause separates product fetches.

use crate::config::Config;
use crate::crawler::extractor::parse_product;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::scanner::{extract_cards, load_search_page};
use crate::crawler::selectors::PageSelectors;
use crate::output::{export_records, ExportSummary};
use crate::product::{FilterCriteria, ProductRecord};
use crate::url::{search_page_url, site_origin};
use crate::HarvestError;
use rand::Rng;
use reqwest::Client;
use std::time::Duration;

/// Records collected by one crawl, with counters for reporting
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Successfully extracted records, in crawl order
    pub records: Vec<ProductRecord>,

    /// Search pages that yielded at least one card
    pub pages_scanned: u32,

    /// Product cards with a usable link
    pub cards_seen: usize,

    /// Product pages that could not be fetched
    pub products_dropped: usize,
}

/// How a complete run ended
#[derive(Debug)]
pub enum CrawlOutcome {
    /// Both exports were written
    Exported(ExportSummary),

    /// Nothing was collected, so nothing was written
    NothingCollected,
}

/// Main crawl coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    selectors: PageSelectors,
    origin: String,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - HTTP client built and selectors compiled
    /// * `Err(HarvestError)` - Failed to initialize
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.http)?;
        let selectors = PageSelectors::compile()?;
        let origin = site_origin(&config.site.base_url);

        Ok(Self {
            config,
            client,
            selectors,
            origin,
        })
    }

    /// Runs the crawl loop
    ///
    /// Stops at the configured page bound, or earlier at the first page that
    /// fails to load or has no cards. Product pages that fail to load are
    /// dropped without retry.
    pub async fn run(&self) -> CrawlReport {
        let mut report = CrawlReport::default();
        let site = &self.config.site;
        let mut fetched_any_product = false;

        for page in 1..=self.config.crawler.max_pages {
            match search_page_url(site, page) {
                Ok(url) => tracing::info!("Scanning search page {}: {}", page, url),
                Err(_) => tracing::info!("Scanning search page {}", page),
            }

            let cards = match load_search_page(&self.client, site, &site.query, page).await {
                Some(document) => extract_cards(&document, &self.selectors, &self.origin),
                None => {
                    tracing::info!("Search page {} could not be loaded, stopping", page);
                    break;
                }
            };

            if cards.is_empty() {
                tracing::info!("Search page {} has no product cards, stopping", page);
                break;
            }

            tracing::info!("Search page {}: {} product cards", page, cards.len());
            report.pages_scanned += 1;
            report.cards_seen += cards.len();

            for card in &cards {
                if fetched_any_product {
                    self.pause().await;
                }
                fetched_any_product = true;

                tracing::debug!("Fetching product {}", card.url);
                match parse_product(
                    &self.client,
                    &self.selectors,
                    &card.url,
                    card.product_id.as_deref(),
                    &self.origin,
                )
                .await
                {
                    Some(record) => report.records.push(record),
                    None => report.products_dropped += 1,
                }
            }
        }

        tracing::info!(
            "Crawl finished: {} records from {} pages ({} products dropped)",
            report.records.len(),
            report.pages_scanned,
            report.products_dropped
        );

        report
    }

    /// Sleeps a random interval within the configured delay bounds
    async fn pause(&self) {
        let crawler = &self.config.crawler;
        let millis = rand::rng().random_range(crawler.min_delay_ms..=crawler.max_delay_ms);
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

/// Runs a crawl and exports the result
///
/// # Returns
///
/// * `Ok(CrawlOutcome::Exported)` - Both tables were written
/// * `Ok(CrawlOutcome::NothingCollected)` - No records, no files written
/// * `Err(HarvestError)` - Setup or export failed
pub async fn run_crawl(config: Config) -> Result<CrawlOutcome, HarvestError> {
    let coordinator = Coordinator::new(config)?;
    let report = coordinator.run().await;

    if report.records.is_empty() {
        tracing::warn!("No product records were collected; skipping export");
        return Ok(CrawlOutcome::NothingCollected);
    }

    let criteria = FilterCriteria::from(&coordinator.config.filter);
    let summary = export_records(&report.records, &criteria, &coordinator.config.output)?;

    tracing::info!(
        "Exported {} records to {} and {} filtered records to {}",
        summary.full_rows,
        summary.full_path.display(),
        summary.filtered_rows,
        summary.filtered_path.display()
    );

    Ok(CrawlOutcome::Exported(summary))
}
