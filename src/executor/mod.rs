//! Concurrent fetch dispatcher
//!
//! Every URL becomes one future; all of them are polled together on the
//! current task and the batch resolves once the last one has. A semaphore
//! sized to the connection cap decides how many requests are on the wire at
//! once; the rest wait for a permit.

use crate::{
    client::HttpFetcher,
    error::Result,
    logging::NetworkLogger,
    models::FetchResult,
    source::read_urls,
    stats::Summary,
};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::{sync::Semaphore, time::Instant};

/// Outcome of one complete run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// One entry per dispatched URL, in input order
    pub results: Vec<FetchResult>,
    pub summary: Summary,
}

impl BatchReport {
    pub fn new(results: Vec<FetchResult>, total_time: Duration) -> Self {
        let summary = Summary::from_results(&results, total_time);
        Self { results, summary }
    }

    pub fn total_time(&self) -> Duration {
        Duration::from_secs_f64(self.summary.total_time)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FetchResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

/// Issues one GET per URL through a shared fetcher
pub struct Dispatcher {
    fetcher: Arc<dyn HttpFetcher>,
    limiter: Semaphore,
    max_in_flight: usize,
    logger: Option<NetworkLogger>,
}

impl Dispatcher {
    /// `max_in_flight` is clamped to at least one
    pub fn new(fetcher: Arc<dyn HttpFetcher>, max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            fetcher,
            limiter: Semaphore::new(max_in_flight),
            max_in_flight,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: NetworkLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Fetch every URL, calling `on_complete` as each request finishes.
    ///
    /// Returns only after all requests have resolved; completion order of the
    /// callbacks follows the network, the report keeps input order.
    pub async fn run<C>(&self, urls: Vec<String>, on_complete: C) -> BatchReport
    where
        C: Fn(&FetchResult),
    {
        let on_complete = &on_complete;
        let start = Instant::now();

        let fetches = urls.into_iter().map(|url| async move {
            let outcome = {
                // The semaphore is never closed, so acquire cannot fail
                let _permit = self.limiter.acquire().await.ok();
                self.fetcher.fetch(&url).await
            };
            let result = FetchResult::new(url, outcome);

            if let Some(logger) = &self.logger {
                logger.log_fetch(&result);
            }
            on_complete(&result);
            result
        });

        let results = join_all(fetches).await;
        let report = BatchReport::new(results, start.elapsed());

        if let Some(logger) = &self.logger {
            logger.log_batch(&report.summary);
        }

        report
    }

    /// Read the URL file completely, then fetch everything in it.
    ///
    /// A missing or unreadable file fails before any request is made.
    pub async fn run_file<P, C>(&self, path: P, on_complete: C) -> Result<BatchReport>
    where
        P: AsRef<Path>,
        C: Fn(&FetchResult),
    {
        let urls = read_urls(path)?;
        Ok(self.run(urls, on_complete).await)
    }
}
