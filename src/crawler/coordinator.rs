//! Crawl coordinator - main traversal orchestration
//!
//! Owns the frontier and drives the fetch -> extract -> enqueue cycle.
//! Pages are processed one at a time; file downloads run concurrently on
//! a bounded worker set fed from extraction. No per-URL or per-file
//! failure ever terminates the crawl.

use crate::config::Config;
use crate::crawler::fetcher::{
    build_http_client, fetch_page, is_html_content_type, FetchOutcome, RetryPolicy,
};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_references;
use crate::download::{download_file, DownloadOutcome};
use crate::events::{CrawlEvent, ProgressSink};
use crate::storage::Storage;
use crate::url::{extract_domain, TargetSet};
use crate::MagpieError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Immutable description of one crawl run
///
/// The domain is derived from the seed exactly once; every boundary check
/// during the crawl compares against this value.
#[derive(Debug, Clone)]
pub struct CrawlTarget {
    base_url: Url,
    domain: String,
    targets: TargetSet,
}

impl CrawlTarget {
    /// Validates the seed URL and fixes the crawl boundary
    ///
    /// A malformed seed fails here, before any crawl state exists.
    pub fn new(seed: &str, targets: TargetSet) -> Result<Self, MagpieError> {
        let base_url = Url::parse(seed).map_err(|e| MagpieError::InvalidSeed {
            url: seed.to_string(),
            reason: e.to_string(),
        })?;

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(MagpieError::InvalidSeed {
                url: seed.to_string(),
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }

        let domain = extract_domain(&base_url).ok_or_else(|| MagpieError::InvalidSeed {
            url: seed.to_string(),
            reason: "missing host".to_string(),
        })?;

        Ok(Self {
            base_url,
            domain,
            targets,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }
}

/// Lifecycle of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    /// Created, not yet started
    Idle,
    /// Processing the frontier
    Running,
    /// Frontier empty, waiting for in-flight downloads
    Draining,
    /// Cancellation observed, waiting for in-flight downloads
    Cancelled,
    /// Done
    Terminated,
}

/// Cooperative cancellation flag
///
/// Cloned into whoever needs to request a stop (typically a Ctrl-C
/// handler). The crawl loop observes it at iteration boundaries only, so
/// in-flight operations always complete cleanly.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters and timestamps for a finished crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    pub pages_visited: u64,
    pub pages_failed: u64,
    pub files_downloaded: u64,
    pub files_skipped: u64,
    pub downloads_failed: u64,
    pub cancelled: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlSummary {
    /// Wall-clock duration of the run, when both timestamps are present
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// Main crawl coordinator
pub struct Coordinator {
    target: CrawlTarget,
    config: Arc<Config>,
    client: Client,
    frontier: Frontier,
    storage: Arc<dyn Storage>,
    sink: Arc<dyn ProgressSink>,
    cancel: CancelFlag,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a coordinator for one crawl run
    pub fn new(
        target: CrawlTarget,
        config: Config,
        storage: Arc<dyn Storage>,
        sink: Arc<dyn ProgressSink>,
        cancel: CancelFlag,
    ) -> Result<Self, MagpieError> {
        let client = build_http_client(&config.http)?;

        Ok(Self {
            target,
            config: Arc::new(config),
            client,
            frontier: Frontier::new(),
            storage,
            sink,
            cancel,
            phase: CrawlPhase::Idle,
        })
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl to completion
    ///
    /// Seeds the frontier with the base URL, then loops: dequeue, fetch,
    /// extract, dispatch downloads, enqueue discovered links. Terminates
    /// when the frontier drains or cancellation is observed; either way,
    /// in-flight downloads are awaited before the summary is returned.
    pub async fn run(&mut self) -> Result<CrawlSummary, MagpieError> {
        let mut summary = CrawlSummary {
            started_at: Some(Utc::now()),
            ..Default::default()
        };

        tracing::info!(
            "Starting crawl of {} (domain: {}, targets: {:?})",
            self.target.base_url(),
            self.target.domain(),
            self.target.targets().extensions()
        );

        self.phase = CrawlPhase::Running;
        self.frontier.enqueue(self.target.base_url().clone());

        let retry = RetryPolicy::from_config(&self.config.crawler);
        let download_slots = Arc::new(Semaphore::new(
            self.config.crawler.max_concurrent_downloads as usize,
        ));
        let mut downloads: JoinSet<DownloadOutcome> = JoinSet::new();

        while let Some(url) = self.frontier.dequeue() {
            if self.cancel.is_cancelled() {
                self.phase = CrawlPhase::Cancelled;
                summary.cancelled = true;
                self.sink.event(&CrawlEvent::Cancelled);
                break;
            }

            // Collect downloads that finished since the last page, so the
            // set does not grow with the crawl.
            while let Some(joined) = downloads.try_join_next() {
                record_download(&mut summary, joined);
            }

            summary.pages_visited += 1;
            self.sink.event(&CrawlEvent::Visiting { url: url.clone() });

            match fetch_page(&self.client, &url, &retry).await {
                FetchOutcome::Success { body, content_type } => {
                    if is_html_content_type(&content_type) {
                        let refs = extract_references(
                            &body,
                            &url,
                            self.target.targets(),
                            self.target.domain(),
                        );

                        for file_url in refs.downloads {
                            self.spawn_download(&mut downloads, &download_slots, file_url);
                        }
                        for link in refs.crawl_links {
                            self.frontier.enqueue(link);
                        }
                    } else {
                        tracing::debug!("Not HTML ({}), skipping extraction: {}", content_type, url);
                    }
                }
                FetchOutcome::NotFound => {
                    summary.pages_failed += 1;
                    self.sink.event(&CrawlEvent::PageSkipped {
                        url,
                        reason: "404 Not Found".to_string(),
                    });
                }
                FetchOutcome::Forbidden => {
                    summary.pages_failed += 1;
                    self.sink.event(&CrawlEvent::PageSkipped {
                        url,
                        reason: "403 Forbidden".to_string(),
                    });
                }
                FetchOutcome::ExhaustedRetries => {
                    summary.pages_failed += 1;
                    self.sink.event(&CrawlEvent::PageSkipped {
                        url,
                        reason: "retries exhausted".to_string(),
                    });
                }
            }
        }

        if !summary.cancelled {
            self.phase = CrawlPhase::Draining;
        }

        // In-flight downloads run to completion in both exit paths; only
        // new work stops.
        while let Some(joined) = downloads.join_next().await {
            record_download(&mut summary, joined);
        }

        self.phase = CrawlPhase::Terminated;
        summary.finished_at = Some(Utc::now());

        tracing::info!(
            "Crawl finished: {} pages visited, {} files downloaded, {} skipped, {} failed",
            summary.pages_visited,
            summary.files_downloaded,
            summary.files_skipped,
            summary.downloads_failed
        );

        Ok(summary)
    }

    /// Dispatches one file download onto the bounded worker set
    fn spawn_download(
        &self,
        downloads: &mut JoinSet<DownloadOutcome>,
        slots: &Arc<Semaphore>,
        file_url: Url,
    ) {
        let client = self.client.clone();
        let storage = Arc::clone(&self.storage);
        let sink = Arc::clone(&self.sink);
        let slots = Arc::clone(slots);
        let timeout = Duration::from_secs(self.config.http.file_timeout_secs);

        downloads.spawn(async move {
            // Never closed while the set is alive; None only if it were.
            let _permit = slots.acquire_owned().await.ok();
            download_file(&client, &file_url, timeout, storage.as_ref(), sink.as_ref()).await
        });
    }
}

fn record_download(
    summary: &mut CrawlSummary,
    joined: Result<DownloadOutcome, tokio::task::JoinError>,
) {
    match joined {
        Ok(DownloadOutcome::Completed { .. }) => summary.files_downloaded += 1,
        Ok(DownloadOutcome::DuplicateSkipped { .. }) => summary.files_skipped += 1,
        Ok(DownloadOutcome::Failed { .. }) => summary.downloads_failed += 1,
        Err(e) => {
            tracing::error!("Download task failed to run: {}", e);
            summary.downloads_failed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> TargetSet {
        TargetSet::from_extensions([".pdf"])
    }

    #[test]
    fn test_target_derives_domain_once() {
        let target = CrawlTarget::new("https://Example.COM/start", targets()).unwrap();
        assert_eq!(target.domain(), "example.com");
        assert_eq!(target.base_url().as_str(), "https://example.com/start");
    }

    #[test]
    fn test_malformed_seed_fails_fast() {
        assert!(matches!(
            CrawlTarget::new("not a url", targets()),
            Err(MagpieError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn test_non_http_seed_rejected() {
        assert!(matches!(
            CrawlTarget::new("ftp://example.com/", targets()),
            Err(MagpieError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn test_cancel_flag_propagates_to_clones() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_cancelled());
        flag.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_summary_duration() {
        let mut summary = CrawlSummary::default();
        assert!(summary.duration().is_none());

        let start = Utc::now();
        summary.started_at = Some(start);
        summary.finished_at = Some(start + chrono::Duration::seconds(5));
        assert_eq!(summary.duration().unwrap().num_seconds(), 5);
    }

    // The full loop, including the 403-on-seed and download scenarios, is
    // exercised against wiremock servers in the integration tests.
}
