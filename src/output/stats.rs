//! Statistics generation from crawled pages
//!
//! This module provides functionality for computing and displaying
//! crawl statistics from a snapshot of the content store.

use crate::state::{MediaKind, Page, PageState};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Total number of pages discovered
    pub total_pages: u64,

    pub ready_pages: u64,
    pub pending_pages: u64,

    /// Pages fetched and parsed as HTML
    pub html_pages: u64,

    /// Count of pages by HTTP status code
    pub pages_by_status: BTreeMap<u16, u64>,

    /// Fetches that got no HTTP response (status 0)
    pub failed_fetches: u64,

    /// Unique internal links across all pages
    pub internal_links: u64,

    /// Unique external links across all pages
    pub external_links: u64,

    /// Unique media sources by kind
    pub media_by_kind: BTreeMap<MediaKind, u64>,
}

impl CrawlStatistics {
    /// Computes statistics over a set of pages
    pub fn from_pages(pages: &[Page]) -> Self {
        let mut stats = Self {
            total_pages: pages.len() as u64,
            ..Self::default()
        };

        let mut internal = HashSet::new();
        let mut external = HashSet::new();
        let mut media: HashMap<MediaKind, HashSet<&str>> = HashMap::new();

        for page in pages {
            match page.state {
                PageState::Ready => stats.ready_pages += 1,
                PageState::Pending => stats.pending_pages += 1,
            }

            if page.is_html() {
                stats.html_pages += 1;
            }

            // Pending pages were never fetched
            if page.state.is_terminal() {
                *stats.pages_by_status.entry(page.status_code).or_insert(0) += 1;
                if page.status_code == 0 {
                    stats.failed_fetches += 1;
                }
            }

            internal.extend(page.internal_links.iter().map(String::as_str));
            external.extend(page.external_links.iter().map(String::as_str));
            for (kind, sources) in &page.media {
                media
                    .entry(*kind)
                    .or_default()
                    .extend(sources.iter().map(String::as_str));
            }
        }

        stats.internal_links = internal.len() as u64;
        stats.external_links = external.len() as u64;
        stats.media_by_kind = media
            .into_iter()
            .map(|(kind, sources)| (kind, sources.len() as u64))
            .collect();

        stats
    }

    /// Pages that answered with a 2xx status
    pub fn successful_pages(&self) -> u64 {
        self.pages_by_status
            .iter()
            .filter(|(status, _)| (200..300).contains(*status))
            .map(|(_, count)| count)
            .sum()
    }

    /// Returns the success rate as a percentage of ready pages
    pub fn success_rate(&self) -> f64 {
        if self.ready_pages == 0 {
            return 0.0;
        }
        (self.successful_pages() as f64 / self.ready_pages as f64) * 100.0
    }

    /// Total media sources across all kinds
    pub fn total_media(&self) -> u64 {
        self.media_by_kind.values().sum()
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Total pages discovered: {}", stats.total_pages);
    println!("  Ready: {}", stats.ready_pages);
    println!("  Pending: {}", stats.pending_pages);
    println!("  HTML pages: {}", stats.html_pages);
    println!("  Internal links found: {}", stats.internal_links);
    println!("  External links found: {}", stats.external_links);
    println!();

    if !stats.pages_by_status.is_empty() {
        println!("Pages by Status:");
        for (status, count) in &stats.pages_by_status {
            let label = if *status == 0 {
                "no response".to_string()
            } else {
                status.to_string()
            };
            println!("  {}: {}", label, count);
        }
        println!();
    }

    if !stats.media_by_kind.is_empty() {
        println!("Media:");
        for (kind, count) in &stats.media_by_kind {
            println!("  {}: {}", kind, count);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} pages answered with 2xx)",
        stats.success_rate(),
        stats.successful_pages(),
        stats.ready_pages
    );
}
