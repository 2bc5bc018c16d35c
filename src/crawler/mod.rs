//! Crawler module for web page fetching and processing
//!
//! A crawl is a pipeline of three concurrent stages joined by queues:
//!
//! ```text
//! work queue --> [fetch stage] --> fetched queue --> [parse stage]
//!     ^                                                   |
//!     |                                             parsed queue
//!     |                                                   v
//!     +------------- new internal links ------------ [aggregator]
//! ```
//!
//! - The fetch stage runs a bounded pool of workers
//! - The parse stage turns HTML into pages through a `ParsingContext`
//! - The aggregator is the only writer of the content store and decides
//!   when the crawl is complete

mod aggregator;
mod coordinator;
mod fetcher;
mod parse_stage;
mod parser;
mod scheduler;

#[cfg(test)]
mod testing;

pub use aggregator::Aggregator;
pub use coordinator::{CrawlOutcome, Crawler};
pub use fetcher::{
    build_http_client, fetch_url, is_html_content_type, is_text_content_type, Fetch, FetchResult,
    FetchedPage, HttpFetcher,
};
pub use parse_stage::ParseStage;
pub use parser::{GenericParsingContext, ParsingContext};
pub use scheduler::FetchStage;

use tokio::sync::watch;

/// Resolves once the shutdown flag is set or its sender is gone
pub(crate) async fn shutdown_signalled(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}
