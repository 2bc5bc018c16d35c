//! Output module for reporting crawl results
//!
//! This module handles:
//! - Computing statistics over the pages of a crawl
//! - Printing pages and statistics to stdout
//! - Generating markdown summaries of crawl results

mod markdown;
pub mod stats;
mod summary;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, CrawlStatistics};
pub use summary::{CrawlSummary, OutputError, OutputResult};

use crate::state::Page;

/// Prints one block per page, sorted by URL
pub fn print_pages(pages: &[Page]) {
    let mut sorted: Vec<&Page> = pages.iter().collect();
    sorted.sort_by(|a, b| a.url().cmp(b.url()));

    for page in sorted {
        println!("ID:     {}", page.id());
        println!("URL:    {}", page.url());
        println!("STATE:  {}", page.state);
        println!("MIME:   {}", page.mime_type.as_deref().unwrap_or("-"));
        println!("STATUS: {}", page.status_code);
        println!("TITLE:  {}", page.title.as_deref().unwrap_or("-"));
        println!();
    }
}
