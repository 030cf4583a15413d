//! wb-harvest main entry point
//!
//! This is the command-line interface for the marketplace harvester.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wb_harvest::config::{load_config_with_hash, validate, Config, OutputFormat};
use wb_harvest::crawler::crawl;
use wb_harvest::output::writer_for;
use wb_harvest::url::search_page_url;
use wb_harvest::CrawlOutcome;

/// wb-harvest: marketplace search-result harvester
///
/// Crawls the search results for a query, extracts every product page and
/// writes a full export plus a filtered export of well-rated, affordable
/// products of the configured origin.
#[derive(Parser, Debug)]
#[command(name = "wb-harvest")]
#[command(version)]
#[command(about = "Marketplace search-result harvester", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (built-in defaults otherwise)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the search query
    #[arg(long)]
    query: Option<String>,

    /// Override the number of search pages to scan
    #[arg(long, value_name = "N")]
    pages: Option<u32>,

    /// Override the export format (xlsx or csv)
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    validate(&config)?;

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    match crawl(config).await {
        Ok(CrawlOutcome::Exported(summary)) => {
            println!(
                "Готово: {} ({} шт.) и {} ({} шт.)",
                summary.full_path.display(),
                summary.full_rows,
                summary.filtered_path.display(),
                summary.filtered_rows
            );
            Ok(())
        }
        Ok(CrawlOutcome::NothingCollected) => {
            println!("Данные не собраны (скорее всего, сайт ограничивает запросы с этого IP).");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wb_harvest=info,warn"),
            1 => EnvFilter::new("wb_harvest=debug,info"),
            2 => EnvFilter::new("wb_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(query) = &cli.query {
        config.site.query = query.clone();
    }
    if let Some(pages) = cli.pages {
        config.crawler.max_pages = pages;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== wb-harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Query: {}", config.site.query);
    println!("  First search page: {}", search_page_url(&config.site, 1)?);

    println!("\nCrawler:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!(
        "  Delay between products: {}-{}ms",
        config.crawler.min_delay_ms, config.crawler.max_delay_ms
    );
    println!("  Request timeout: {}s", config.http.timeout_secs);

    println!("\nFilter:");
    println!("  Price <= {}", config.filter.max_price);
    println!("  Rating >= {}", config.filter.min_rating);
    println!("  Country contains: {}", config.filter.country_contains);

    let ext = writer_for(config.output.format).extension();
    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Full export: {}.{}", config.output.full_name, ext);
    println!("  Filtered export: {}.{}", config.output.filtered_name, ext);

    println!("\n✓ Configuration is valid");

    Ok(())
}
