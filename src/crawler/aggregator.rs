//! Aggregation stage: the single writer of the content store
//!
//! For each parsed page the aggregator:
//! 1. Registers every unseen internal link as a pending page and queues it
//! 2. Marks the page ready and stores it
//! 3. Signals completion once no page is left pending
//!
//! Step 1 always happens before step 2, so the store never reports
//! "nothing pending" while links of the page are still unregistered.

use crate::crawler::shutdown_signalled;
use crate::state::{Page, PageIdentity};
use crate::storage::Storage;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot, watch};

/// Pages between two progress log lines
const PROGRESS_INTERVAL: usize = 10;

/// The aggregation stage of the pipeline
pub struct Aggregator<S: Storage> {
    storage: S,
    parsed_rx: mpsc::UnboundedReceiver<Page>,
    work_tx: mpsc::UnboundedSender<String>,
    completion: Option<oneshot::Sender<()>>,
    shutdown: watch::Receiver<bool>,
    pages_processed: usize,
    started: Instant,
}

impl<S: Storage> Aggregator<S> {
    pub fn new(
        storage: S,
        parsed_rx: mpsc::UnboundedReceiver<Page>,
        work_tx: mpsc::UnboundedSender<String>,
        completion: oneshot::Sender<()>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            storage,
            parsed_rx,
            work_tx,
            completion: Some(completion),
            shutdown,
            pages_processed: 0,
            started: Instant::now(),
        }
    }

    /// Runs until the crawl completes, shutdown is signalled or the parse
    /// stage is gone, then hands back the store
    pub async fn run(mut self) -> S {
        tracing::debug!("Aggregation stage started");

        loop {
            let page = tokio::select! {
                biased;
                _ = shutdown_signalled(&mut self.shutdown) => break,
                page = self.parsed_rx.recv() => match page {
                    Some(page) => page,
                    None => {
                        tracing::warn!("Parse stage closed before the crawl completed");
                        break;
                    }
                },
            };

            if self.handle_page(page) {
                break;
            }
        }

        tracing::debug!(
            "Aggregation stage stopped after {} pages",
            self.pages_processed
        );
        self.storage
    }

    /// Folds one parsed page into the store
    ///
    /// Returns true when this page completed the crawl. The completion
    /// signal is raised in the same step.
    pub fn handle_page(&mut self, mut page: Page) -> bool {
        if page.is_html() {
            for link in &page.internal_links {
                let id = PageIdentity::of(link);
                if self.storage.contains(&id) {
                    continue;
                }

                self.storage.save(Page::new(link.as_str()));
                if self.work_tx.send(link.clone()).is_err() {
                    tracing::debug!("Work queue closed, {} stays pending", link);
                }
            }
        }

        page.mark_ready();
        tracing::debug!("Ready: {} ({})", page.url(), page.status_code);
        self.storage.save(page);
        self.pages_processed += 1;

        if self.pages_processed % PROGRESS_INTERVAL == 0 {
            tracing::info!(
                "Progress: {} pages done, {} pending ({:.1}s)",
                self.pages_processed,
                self.storage.pending_count(),
                self.started.elapsed().as_secs_f64()
            );
        }

        if self.storage.has_pending() {
            return false;
        }

        tracing::info!(
            "Crawl complete: {} pages in {:.1}s",
            self.storage.len(),
            self.started.elapsed().as_secs_f64()
        );
        if let Some(completion) = self.completion.take() {
            let _ = completion.send(());
        }
        true
    }

    /// Number of pages folded in so far
    pub fn pages_processed(&self) -> usize {
        self.pages_processed
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
