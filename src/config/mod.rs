//! Configuration module for wb-harvest
//!
//! The harvester runs on built-in defaults; an optional TOML file can
//! override any of them.
//!
//! # Example
//!
//! ```no_run
//! use wb_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wb-harvest.toml")).unwrap();
//! println!("Crawler will scan up to {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FilterConfig, HttpConfig, OutputConfig, OutputFormat, SiteConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
