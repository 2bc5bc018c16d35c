//! webcrawler main entry point
//!
//! This is the command-line interface for the single-site web crawler.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use webcrawler::config::{load_config, Config, ConfigOverrides};
use webcrawler::output::{
    generate_markdown_summary, print_pages, print_statistics, CrawlStatistics, CrawlSummary,
};
use webcrawler::{CrawlOutcome, Crawler};

/// webcrawler: crawls one website from a seed URL
///
/// Every page on the seed's domain that is reachable through links is
/// fetched once. External links are recorded but never followed.
#[derive(Parser, Debug)]
#[command(name = "webcrawler")]
#[command(version)]
#[command(about = "A concurrent single-site web crawler", long_about = None)]
struct Cli {
    /// URL the crawl starts from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of parallel fetchers (overrides the configuration)
    #[arg(short, long)]
    fetchers: Option<usize>,

    /// Write a markdown summary to this path (overrides the configuration)
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let loaded = load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", loaded.hash);
            loaded.config
        }
        None => Config::default(),
    };

    let overrides = ConfigOverrides {
        fetchers: cli.fetchers,
        summary_path: cli.summary.as_ref().map(|p| p.display().to_string()),
    };
    let config = config
        .with_overrides(&overrides)
        .context("Invalid configuration")?;

    handle_crawl(&config, &cli.seed, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webcrawler=info,warn"),
            1 => EnvFilter::new("webcrawler=debug,info"),
            2 => EnvFilter::new("webcrawler=trace,debug"),
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

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, seed: &str, quiet: bool) -> anyhow::Result<()> {
    let mut crawler = Crawler::new(config).context("Failed to build the HTTP client")?;

    let started_at = Utc::now();
    let outcome = match crawler.crawl_until(seed, interrupted()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };
    let finished_at = Utc::now();

    if outcome == CrawlOutcome::Interrupted {
        tracing::warn!("Crawl interrupted, results are partial");
    }

    let pages = crawler.pages();
    let statistics = CrawlStatistics::from_pages(&pages);

    if !quiet {
        print_pages(&pages);
        print_statistics(&statistics);
    }

    if let Some(path) = &config.output.summary_path {
        let summary = CrawlSummary::new(
            seed,
            started_at,
            finished_at,
            outcome,
            crawler.fetchers(),
            statistics,
        );
        generate_markdown_summary(&summary, &pages, Path::new(path))
            .with_context(|| format!("Failed to write summary to {}", path))?;
        tracing::info!("Summary written to: {}", path);
    }

    Ok(())
}
