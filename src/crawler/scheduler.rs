//! Fetch stage: a bounded pool of fetch workers fed by the work queue
//!
//! This module handles:
//! - Taking URLs off the work queue in FIFO order
//! - Global concurrency limiting via a semaphore
//! - Handing exactly one `FetchedPage` per URL to the parse stage
//! - Stopping intake on shutdown while in-flight fetches run to completion

use crate::crawler::fetcher::{Fetch, FetchResult, FetchedPage};
use crate::crawler::shutdown_signalled;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, OwnedSemaphorePermit, Semaphore};
use tracing::Instrument;

/// The fetch stage of the pipeline
pub struct FetchStage<F: Fetch> {
    fetcher: Arc<F>,

    /// Bounds the number of concurrent fetches
    semaphore: Arc<Semaphore>,

    workers: usize,
    work_rx: mpsc::UnboundedReceiver<String>,
    fetched_tx: mpsc::UnboundedSender<FetchedPage>,
    shutdown: watch::Receiver<bool>,
}

impl<F: Fetch> FetchStage<F> {
    /// Creates a fetch stage with `workers` concurrent fetch slots
    pub fn new(
        fetcher: Arc<F>,
        workers: usize,
        work_rx: mpsc::UnboundedReceiver<String>,
        fetched_tx: mpsc::UnboundedSender<FetchedPage>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let workers = workers.max(1);
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers)),
            workers,
            work_rx,
            fetched_tx,
            shutdown,
        }
    }

    /// Number of currently free fetch slots
    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Runs until shutdown is signalled or the work queue is closed
    ///
    /// A URL is only taken off the queue once a worker slot is free, so
    /// queued URLs beyond the pool size stay in the queue.
    pub async fn run(mut self) {
        tracing::debug!("Fetch stage started with {} workers", self.workers);

        loop {
            let permit = tokio::select! {
                biased;
                _ = shutdown_signalled(&mut self.shutdown) => break,
                permit = Arc::clone(&self.semaphore).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let url = tokio::select! {
                biased;
                _ = shutdown_signalled(&mut self.shutdown) => break,
                url = self.work_rx.recv() => match url {
                    Some(url) => url,
                    None => break,
                },
            };

            self.spawn_worker(url, permit);
        }

        // Close the pool; running workers finish on their own
        self.semaphore.close();
        tracing::debug!("Fetch stage stopped");
    }

    fn spawn_worker(&self, url: String, permit: OwnedSemaphorePermit) {
        let fetcher = Arc::clone(&self.fetcher);
        let fetched_tx = self.fetched_tx.clone();
        let span = tracing::debug_span!("fetch", url = %url);

        tokio::spawn(
            async move {
                let _permit = permit;

                // A panicking fetch still has to yield a record for its URL
                let target = url.clone();
                let result = tokio::spawn(async move { fetcher.fetch(&target).await })
                    .await
                    .unwrap_or_else(|e| FetchResult::Failed {
                        error: format!("fetch task failed: {}", e),
                    });

                tracing::debug!("Fetched {}", url);
                if fetched_tx.send(FetchedPage::from_result(url, result)).is_err() {
                    tracing::debug!("Parse stage is gone, dropping fetch result");
                }
            }
            .instrument(span),
        );
    }
}
