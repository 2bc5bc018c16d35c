//! In-process fetcher for pipeline tests

use crate::crawler::fetcher::{Fetch, FetchResult};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Serves canned responses; unknown URLs fail like an unreachable host
#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    responses: HashMap<String, FetchResult>,
    hanging: HashSet<String>,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl StaticFetcher {
    pub(crate) fn with_html(self, url: &str, body: &str) -> Self {
        self.with_result(
            url,
            FetchResult::Success {
                status_code: 200,
                content_type: Some("text/html; charset=utf-8".to_string()),
                body: body.to_string(),
            },
        )
    }

    pub(crate) fn with_status(self, url: &str, status_code: u16) -> Self {
        self.with_result(url, FetchResult::HttpStatus { status_code })
    }

    pub(crate) fn with_result(mut self, url: &str, result: FetchResult) -> Self {
        self.responses.insert(url.to_string(), result);
        self
    }

    /// The fetch for this URL never completes
    pub(crate) fn with_hanging(mut self, url: &str) -> Self {
        self.hanging.insert(url.to_string());
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every URL requested so far, in request order
    pub(crate) fn requests_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requests)
    }

    pub(crate) fn max_in_flight_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.max_in_flight)
    }
}

impl Fetch for StaticFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        self.requests.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if self.hanging.contains(url) {
            std::future::pending::<()>().await;
        }
        match self.delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| FetchResult::Failed {
                error: format!("no route to {}", url),
            })
    }
}
