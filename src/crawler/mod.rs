//! Crawler module for search scanning and product extraction
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with fixed headers and timeout
//! - Search result card discovery
//! - Product page field extraction
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod scanner;
mod selectors;
mod text;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome, CrawlReport};
pub use extractor::{extract_product, parse_product};
pub use fetcher::{build_http_client, fetch_document, fetch_url, FetchResult};
pub use scanner::{extract_cards, load_search_page, ProductCard};
pub use selectors::{PageSelectors, SelectorChain};
pub use text::{find_text_node, parse_integer, parse_rating, stripped_text, TextMatch};

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete harvest
///
/// This is the main entry point. It will:
/// 1. Build the HTTP client and compile selectors
/// 2. Scan search pages until the bound or the first empty/failed page
/// 3. Extract a record from every product card
/// 4. Write the full and filtered exports
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl finished (possibly with nothing collected)
/// * `Err(HarvestError)` - Setup or export failed
pub async fn crawl(config: Config) -> Result<CrawlOutcome, HarvestError> {
    run_crawl(config).await
}
