//! URL handling module for wb-harvest
//!
//! Link absolutization for markup-derived URLs and construction of the
//! paginated search request.

mod normalize;

use crate::config::SiteConfig;

pub use normalize::{absolutize, site_origin};

/// Builds the search endpoint URL (without query parameters)
pub fn search_endpoint(site: &SiteConfig) -> String {
    format!("{}{}", site_origin(&site.base_url), site.search_path)
}

/// Query parameters for one page of search results
///
/// Parameter order is fixed: `search`, `page`, `sort`.
pub fn search_params(query: &str, page: u32, sort: &str) -> Vec<(&'static str, String)> {
    vec![
        ("search", query.to_string()),
        ("page", page.to_string()),
        ("sort", sort.to_string()),
    ]
}

/// Renders the complete search URL for a page, for logging and dry runs
///
/// # Examples
///
/// ```
/// use wb_harvest::config::SiteConfig;
/// use wb_harvest::url::search_page_url;
///
/// let site = SiteConfig {
///     base_url: "https://shop.example.com/".to_string(),
///     search_path: "/search".to_string(),
///     query: "coat".to_string(),
///     sort: "popular".to_string(),
/// };
/// let url = search_page_url(&site, 2).unwrap();
/// assert_eq!(url.as_str(), "https://shop.example.com/search?search=coat&page=2&sort=popular");
/// ```
pub fn search_page_url(site: &SiteConfig, page: u32) -> Result<::url::Url, ::url::ParseError> {
    ::url::Url::parse_with_params(
        &search_endpoint(site),
        search_params(&site.query, page, &site.sort),
    )
}
