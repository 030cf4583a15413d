use serde::Deserialize;

/// Main configuration structure for wb-harvest
///
/// Every section is optional; a missing section or key falls back to the
/// constants the harvester was built around.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub filter: FilterConfig,
    pub output: OutputConfig,
}

/// Target marketplace and search query
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site origin used to absolutize root-relative links
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the catalog search endpoint
    #[serde(rename = "search-path")]
    pub search_path: String,

    /// Search query sent as the `search` parameter
    pub query: String,

    /// Sort order sent as the `sort` parameter
    pub sort: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.wildberries.ru".to_string(),
            search_path: "/catalog/0/search.aspx".to_string(),
            query: "пальто из натуральной шерсти".to_string(),
            sort: "popular".to_string(),
        }
    }
}

/// Crawl loop bounds and pacing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Last search page to visit (pages are numbered from 1)
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Lower bound of the pause between product fetches (milliseconds)
    #[serde(rename = "min-delay-ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the pause between product fetches (milliseconds)
    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 5,
            min_delay_ms: 1000,
            max_delay_ms: 2500,
        }
    }
}

/// Fixed request headers and timeout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    pub accept: String,

    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/121.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,\
                     image/avif,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "ru-RU,ru;q=0.9".to_string(),
            timeout_secs: 20,
        }
    }
}

/// Thresholds for the filtered export
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Highest price (inclusive) a product may have
    #[serde(rename = "max-price")]
    pub max_price: u64,

    /// Lowest rating (inclusive) a product may have
    #[serde(rename = "min-rating")]
    pub min_rating: f64,

    /// Case-sensitive substring the country of origin must contain
    #[serde(rename = "country-contains")]
    pub country_contains: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_price: 10_000,
            min_rating: 4.5,
            country_contains: "Россия".to_string(),
        }
    }
}

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory both exports are written to
    pub directory: String,

    /// File stem of the full export
    #[serde(rename = "full-name")]
    pub full_name: String,

    /// File stem of the filtered export
    #[serde(rename = "filtered-name")]
    pub filtered_name: String,

    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            full_name: "wb_coats_full".to_string(),
            filtered_name: "wb_coats_filtered".to_string(),
            format: OutputFormat::Xlsx,
        }
    }
}
