//! Search results scanning
//!
//! Loads one page of search results and turns its product cards into
//! `(product URL, product id)` pairs.

use crate::config::SiteConfig;
use crate::crawler::fetcher::fetch_document;
use crate::crawler::selectors::PageSelectors;
use crate::url::{absolutize, search_endpoint, search_params};
use reqwest::Client;
use scraper::Html;

/// Card attribute holding the marketplace product id
const PRODUCT_ID_ATTR: &str = "data-nm-id";

/// One search-result tile pointing at a product page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// Absolute product page URL
    pub url: String,

    /// Product id read from the card element, if present
    pub product_id: Option<String>,
}

/// Fetches one page of search results
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `site` - Search endpoint and sort order
/// * `query` - Search query text
/// * `page` - 1-based page number
///
/// # Returns
///
/// The parsed results page, or `None` if the fetch failed
pub async fn load_search_page(
    client: &Client,
    site: &SiteConfig,
    query: &str,
    page: u32,
) -> Option<Html> {
    let endpoint = search_endpoint(site);
    let params = search_params(query, page, &site.sort);
    fetch_document(client, &endpoint, &params).await
}

/// Extracts product cards from a results page, in document order
///
/// Cards without a usable product link are skipped.
pub fn extract_cards(document: &Html, selectors: &PageSelectors, origin: &str) -> Vec<ProductCard> {
    let mut cards = Vec::new();

    for card in document.select(&selectors.card) {
        let Some(link) = selectors.card_link.first_in(card) else {
            tracing::trace!("Skipping card without product link");
            continue;
        };

        let Some(href) = link.value().attr("href").filter(|h| !h.trim().is_empty()) else {
            tracing::trace!("Skipping card link without href");
            continue;
        };

        cards.push(ProductCard {
            url: absolutize(href, origin),
            product_id: card.value().attr(PRODUCT_ID_ATTR).map(str::to_string),
        });
    }

    cards
}
