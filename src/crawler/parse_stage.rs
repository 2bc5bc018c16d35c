//! Parse stage: turns fetched records into pages
//!
//! HTML bodies go through the parsing context on the blocking pool. Every
//! other record becomes a bare page. Status code and MIME type are always
//! copied from the fetch record.

use crate::crawler::fetcher::{is_html_content_type, FetchedPage};
use crate::crawler::parser::ParsingContext;
use crate::crawler::shutdown_signalled;
use crate::state::Page;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// The parse stage of the pipeline
pub struct ParseStage<P: ParsingContext> {
    context: Arc<P>,
    fetched_rx: mpsc::UnboundedReceiver<FetchedPage>,
    parsed_tx: mpsc::UnboundedSender<Page>,
    shutdown: watch::Receiver<bool>,
}

impl<P: ParsingContext> ParseStage<P> {
    pub fn new(
        context: Arc<P>,
        fetched_rx: mpsc::UnboundedReceiver<FetchedPage>,
        parsed_tx: mpsc::UnboundedSender<Page>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            context,
            fetched_rx,
            parsed_tx,
            shutdown,
        }
    }

    /// Runs until shutdown is signalled or the fetch stage is gone
    pub async fn run(mut self) {
        tracing::debug!("Parse stage started");

        loop {
            let fetched = tokio::select! {
                biased;
                _ = shutdown_signalled(&mut self.shutdown) => break,
                fetched = self.fetched_rx.recv() => match fetched {
                    Some(fetched) => fetched,
                    None => break,
                },
            };

            let page = self.build_page(fetched).await;
            if self.parsed_tx.send(page).is_err() {
                tracing::debug!("Aggregation stage is gone, stopping parse stage");
                break;
            }
        }

        tracing::debug!("Parse stage stopped");
    }

    /// Builds the page for one fetch record
    pub async fn build_page(&self, fetched: FetchedPage) -> Page {
        let FetchedPage {
            url,
            mime_type,
            status_code,
            body,
        } = fetched;

        let mut page = match body {
            Some(html) if !html.is_empty() && is_html_content_type(mime_type.as_deref()) => {
                let context = Arc::clone(&self.context);
                let target = url.clone();
                match tokio::task::spawn_blocking(move || context.parse(&target, &html)).await {
                    Ok(page) => page,
                    Err(e) => {
                        tracing::warn!("Parsing {} failed: {}", url, e);
                        Page::new(url)
                    }
                }
            }
            _ => Page::new(url),
        };

        page.status_code = status_code;
        page.mime_type = mime_type;
        page
    }
}
