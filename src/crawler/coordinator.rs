//! Crawler coordinator - main crawl orchestration logic
//!
//! This module wires the pipeline together for one crawl:
//! - Seeding the content store and the work queue
//! - Starting the aggregation, parse and fetch stages
//! - Waiting for completion or an external interrupt
//! - Shutting the stages down and keeping the final store

use crate::config::{validate, Config};
use crate::crawler::aggregator::Aggregator;
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::parse_stage::ParseStage;
use crate::crawler::parser::{GenericParsingContext, ParsingContext};
use crate::crawler::scheduler::FetchStage;
use crate::state::Page;
use crate::storage::{MemoryStorage, Storage};
use crate::url::normalize_seed;
use crate::{CrawlError, Result};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

/// How a crawl ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Every discovered page reached `Ready`
    Complete,

    /// The crawl was stopped before completion; pending pages remain
    Interrupted,
}

impl CrawlOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Interrupted => "interrupted",
        }
    }
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main crawler structure
///
/// Owns the fetcher and parsing context shared by every crawl it runs, and
/// the content store of the most recent crawl.
pub struct Crawler<F: Fetch = HttpFetcher, P: ParsingContext = GenericParsingContext> {
    fetcher: Arc<F>,
    context: Arc<P>,
    fetchers: usize,
    storage: MemoryStorage,
}

impl Crawler {
    /// Creates a crawler with an HTTP fetcher built from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(CrawlError)` - The configuration is invalid or the HTTP client
    ///   could not be built
    pub fn new(config: &Config) -> Result<Self> {
        validate(config)?;
        let fetcher = HttpFetcher::new(&config.crawler, &config.user_agent)?;
        Ok(Self::with_parts(
            fetcher,
            GenericParsingContext,
            config.crawler.fetchers,
        ))
    }
}

impl<F: Fetch, P: ParsingContext> Crawler<F, P> {
    /// Creates a crawler from its collaborators
    ///
    /// A pool size of zero is raised to one.
    pub fn with_parts(fetcher: F, context: P, fetchers: usize) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            context: Arc::new(context),
            fetchers: fetchers.max(1),
            storage: MemoryStorage::new(),
        }
    }

    /// Size of the fetch worker pool
    pub fn fetchers(&self) -> usize {
        self.fetchers
    }

    /// Crawls the site of `seed` until every discovered page is ready
    pub async fn crawl(&mut self, seed: &str) -> Result<CrawlOutcome> {
        self.crawl_until(seed, std::future::pending::<()>()).await
    }

    /// Crawls the site of `seed` until it completes or `interrupt` resolves
    ///
    /// On interrupt the stages stop taking new work and the store keeps
    /// whatever state it had, pending pages included.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - How the crawl ended
    /// * `Err(CrawlError)` - The seed is invalid or a stage died
    pub async fn crawl_until<I>(&mut self, seed: &str, interrupt: I) -> Result<CrawlOutcome>
    where
        I: Future<Output = ()>,
    {
        let seed = normalize_seed(seed)?;
        tracing::info!("Crawling {} with {} fetchers", seed, self.fetchers);

        let (work_tx, work_rx) = mpsc::unbounded_channel();
        let (fetched_tx, fetched_rx) = mpsc::unbounded_channel();
        let (parsed_tx, parsed_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (completion_tx, completion_rx) = oneshot::channel();

        let mut storage = MemoryStorage::new();
        storage.save(Page::new(seed.as_str()));

        let aggregator = tokio::spawn(
            Aggregator::new(
                storage,
                parsed_rx,
                work_tx.clone(),
                completion_tx,
                shutdown_rx.clone(),
            )
            .run(),
        );
        let parser = tokio::spawn(
            ParseStage::new(
                Arc::clone(&self.context),
                fetched_rx,
                parsed_tx,
                shutdown_rx.clone(),
            )
            .run(),
        );
        let fetcher = tokio::spawn(
            FetchStage::new(
                Arc::clone(&self.fetcher),
                self.fetchers,
                work_rx,
                fetched_tx,
                shutdown_rx,
            )
            .run(),
        );

        // Only the aggregator may feed the queue from here on
        let seeded = work_tx.send(seed).is_ok();
        drop(work_tx);

        tokio::pin!(interrupt);
        let outcome = if seeded {
            tokio::select! {
                done = completion_rx => done.ok().map(|_| CrawlOutcome::Complete),
                _ = &mut interrupt => {
                    tracing::info!("Interrupt received, stopping crawl");
                    Some(CrawlOutcome::Interrupted)
                }
            }
        } else {
            None
        };

        let _ = shutdown_tx.send(true);

        self.storage = aggregator.await?;
        parser.await?;
        fetcher.await?;

        let outcome = outcome.ok_or_else(|| {
            CrawlError::Pipeline("aggregation stage stopped before the crawl completed".to_string())
        })?;

        tracing::info!(
            "Crawl {}: {} pages, {} pending",
            outcome,
            self.storage.len(),
            self.storage.pending_count()
        );
        Ok(outcome)
    }

    /// Snapshot of every page of the most recent crawl
    pub fn pages(&self) -> Vec<Page> {
        self.storage.all_pages()
    }

    /// Content store of the most recent crawl
    pub fn storage(&self) -> &MemoryStorage {
        &self.storage
    }
}
