//! Crawl summary types
//!
//! A summary wraps the statistics of one crawl with its run metadata.

use crate::crawler::CrawlOutcome;
use crate::output::stats::CrawlStatistics;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    // Run metadata
    pub seed: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: CrawlOutcome,
    pub fetchers: usize,

    pub statistics: CrawlStatistics,
}

impl CrawlSummary {
    pub fn new(
        seed: impl Into<String>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        outcome: CrawlOutcome,
        fetchers: usize,
        statistics: CrawlStatistics,
    ) -> Self {
        Self {
            seed: seed.into(),
            started_at,
            finished_at,
            outcome,
            fetchers,
            statistics,
        }
    }

    /// Wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds().max(0) as f64 / 1000.0
    }

    /// Pages made ready per second
    pub fn pages_per_second(&self) -> f64 {
        let duration = self.duration_seconds();
        if duration <= 0.0 {
            return 0.0;
        }
        self.statistics.ready_pages as f64 / duration
    }
}
