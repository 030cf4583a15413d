//! Product page extraction
//!
//! Each field is located independently; a missing element only empties
//! that one field. Labeled values (article number, review count, country)
//! are found by searching text nodes for a localized label and then looking
//! at the surrounding markup.

use crate::crawler::fetcher::fetch_document;
use crate::crawler::selectors::PageSelectors;
use crate::crawler::text::{
    find_text_containing, find_text_containing_ignore_case, parse_integer, parse_rating,
    stripped_text,
};
use crate::product::ProductRecord;
use crate::url::absolutize;
use reqwest::Client;
use scraper::Html;

/// Text label preceding the article number
const ARTICLE_LABEL: &str = "Артикул";

/// Lowercase stem of "review(s)" in the review counter
const FEEDBACK_STEM: &str = "отзыв";

/// Lowercase stem of "country" in characteristic names
const COUNTRY_STEM: &str = "страна";

/// Fetches a product page and extracts its record
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `selectors` - Compiled selector set
/// * `url` - Absolute product page URL
/// * `known_id` - Product id from the search card, if any
/// * `origin` - Site origin for absolutizing links
///
/// # Returns
///
/// The record, or `None` if the page could not be fetched
pub async fn parse_product(
    client: &Client,
    selectors: &PageSelectors,
    url: &str,
    known_id: Option<&str>,
    origin: &str,
) -> Option<ProductRecord> {
    let document = fetch_document(client, url, &[]).await?;
    Some(extract_product(&document, selectors, url, known_id, origin))
}

/// Extracts a record from an already parsed product page
pub fn extract_product(
    document: &Html,
    selectors: &PageSelectors,
    url: &str,
    known_id: Option<&str>,
    origin: &str,
) -> ProductRecord {
    let (characteristics, country_of_origin) = extract_characteristics(document, selectors);
    let (seller_name, seller_url) = extract_seller(document, selectors, origin);

    ProductRecord {
        product_url: url.to_string(),
        article_id: extract_article(document, selectors, known_id),
        title: extract_title(document, selectors),
        price: extract_price(document, selectors),
        description: extract_description(document, selectors),
        image_urls: extract_images(document, selectors, origin),
        characteristics,
        seller_name,
        seller_url,
        sizes: extract_sizes(document, selectors),
        stock_count: None,
        rating: extract_rating(document, selectors),
        feedback_count: extract_feedback_count(document),
        country_of_origin,
    }
}

fn extract_title(document: &Html, selectors: &PageSelectors) -> String {
    selectors
        .title
        .first(document)
        .map(|el| stripped_text(el, ""))
        .unwrap_or_default()
}

/// Article number shown next to its label overrides the card id
fn extract_article(
    document: &Html,
    selectors: &PageSelectors,
    known_id: Option<&str>,
) -> Option<String> {
    let from_label = find_text_containing(document, ARTICLE_LABEL)
        .and_then(|found| found.parent)
        .and_then(|parent| parent.select(&selectors.label_value).next())
        .map(|value| stripped_text(value, ""))
        .filter(|value| !value.is_empty());

    from_label.or_else(|| known_id.map(str::to_string))
}

fn extract_price(document: &Html, selectors: &PageSelectors) -> Option<u64> {
    selectors
        .price
        .first(document)
        .and_then(|el| parse_integer(&stripped_text(el, "")))
}

fn extract_description(document: &Html, selectors: &PageSelectors) -> String {
    selectors
        .description
        .first(document)
        .map(|el| stripped_text(el, " "))
        .unwrap_or_default()
}

/// Gallery images, preferring `src` over lazy-load `data-src`
fn extract_images(document: &Html, selectors: &PageSelectors, origin: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();

    for img in document.select(&selectors.gallery_image) {
        let attrs = img.value();
        let src = attrs
            .attr("src")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| attrs.attr("data-src").filter(|s| !s.trim().is_empty()));

        let Some(src) = src else {
            continue;
        };

        let url = absolutize(src, origin);
        if !urls.contains(&url) {
            urls.push(url);
        }
    }

    urls
}

/// Characteristic rows as `"name: value"` plus the country of origin
///
/// When several rows name a country the last one wins.
fn extract_characteristics(
    document: &Html,
    selectors: &PageSelectors,
) -> (Vec<String>, Option<String>) {
    let mut characteristics = Vec::new();
    let mut country = None;

    let Some(block) = selectors.characteristics_block.first(document) else {
        return (characteristics, country);
    };

    for row in block.select(&selectors.characteristic_row) {
        let (Some(name_el), Some(value_el)) = (
            selectors.characteristic_name.first_in(row),
            selectors.characteristic_value.first_in(row),
        ) else {
            continue;
        };

        let name = stripped_text(name_el, "");
        let value = stripped_text(value_el, "");
        if name.is_empty() || value.is_empty() {
            continue;
        }

        characteristics.push(format!("{}: {}", name, value));

        if name.to_lowercase().contains(COUNTRY_STEM) {
            country = Some(value);
        }
    }

    (characteristics, country)
}

fn extract_seller(document: &Html, selectors: &PageSelectors, origin: &str) -> (String, String) {
    let Some(seller) = selectors.seller.first(document) else {
        return (String::new(), String::new());
    };

    let name = stripped_text(seller, "");
    let url = seller
        .value()
        .attr("href")
        .filter(|h| !h.trim().is_empty())
        .map(|href| absolutize(href, origin))
        .unwrap_or_default();

    (name, url)
}

fn extract_sizes(document: &Html, selectors: &PageSelectors) -> Vec<String> {
    let Some(block) = selectors.sizes_block.first(document) else {
        return Vec::new();
    };

    block
        .select(&selectors.size_item)
        .map(|el| stripped_text(el, " "))
        .filter(|size| !size.is_empty())
        .collect()
}

fn extract_rating(document: &Html, selectors: &PageSelectors) -> Option<f64> {
    selectors
        .rating
        .first(document)
        .and_then(|el| parse_rating(&stripped_text(el, "")))
}

/// Digits of the first text node mentioning reviews
fn extract_feedback_count(document: &Html) -> Option<u64> {
    find_text_containing_ignore_case(document, FEEDBACK_STEM)
        .and_then(|found| parse_integer(found.text))
}
