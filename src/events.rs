//! Progress events emitted during a crawl
//!
//! The crawl engine reports what it is doing through a [`ProgressSink`];
//! how the events are rendered is the sink's business. The binary installs
//! a tracing-backed console sink, tests usually install [`NullSink`].

use crate::category::Category;
use url::Url;

/// A single progress event from the crawl engine
#[derive(Debug, Clone)]
pub enum CrawlEvent {
    /// A page URL was dequeued and is being fetched
    Visiting { url: Url },

    /// A page could not be fetched or was not processable; the crawl continues
    PageSkipped { url: Url, reason: String },

    /// A download candidate was discovered
    FileFound { url: Url, filename: String },

    /// A file was written to storage
    FileDownloaded {
        filename: String,
        category: Category,
        bytes: u64,
    },

    /// A file already existed at its destination and was not re-downloaded
    FileSkipped { filename: String },

    /// A single download failed; the crawl continues
    DownloadFailed { url: Url, reason: String },

    /// Cancellation was requested; no new work will start
    Cancelled,
}

/// Receiver for crawl progress events
///
/// Implementations must be cheap and non-blocking; events are delivered
/// inline from the crawl loop and from download tasks.
pub trait ProgressSink: Send + Sync {
    fn event(&self, event: &CrawlEvent);
}

/// Sink that logs every event through `tracing`
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn event(&self, event: &CrawlEvent) {
        match event {
            CrawlEvent::Visiting { url } => {
                tracing::info!("Visiting: {}", url);
            }
            CrawlEvent::PageSkipped { url, reason } => {
                tracing::warn!("Skipping {}: {}", url, reason);
            }
            CrawlEvent::FileFound { filename, .. } => {
                tracing::info!("Found file: {}", filename);
            }
            CrawlEvent::FileDownloaded {
                filename,
                category,
                bytes,
            } => {
                tracing::info!("Downloaded {} -> {}/ ({} bytes)", filename, category, bytes);
            }
            CrawlEvent::FileSkipped { filename } => {
                tracing::info!("Skipping duplicate: {}", filename);
            }
            CrawlEvent::DownloadFailed { url, reason } => {
                tracing::warn!("Failed to download {}: {}", url, reason);
            }
            CrawlEvent::Cancelled => {
                tracing::info!("Stopping crawl...");
            }
        }
    }
}

/// Sink that discards every event
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn event(&self, _event: &CrawlEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Sink that records event debug strings, for assertions in tests
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub events: Mutex<Vec<String>>,
    }

    impl ProgressSink for RecordingSink {
        fn event(&self, event: &CrawlEvent) {
            self.events.lock().unwrap().push(format!("{:?}", event));
        }
    }

    #[test]
    fn test_sinks_accept_all_variants() {
        let url = Url::parse("https://example.com/doc.pdf").unwrap();
        let events = [
            CrawlEvent::Visiting { url: url.clone() },
            CrawlEvent::PageSkipped {
                url: url.clone(),
                reason: "404".into(),
            },
            CrawlEvent::FileFound {
                url: url.clone(),
                filename: "doc.pdf".into(),
            },
            CrawlEvent::FileDownloaded {
                filename: "doc.pdf".into(),
                category: Category::Pdf,
                bytes: 1024,
            },
            CrawlEvent::FileSkipped {
                filename: "doc.pdf".into(),
            },
            CrawlEvent::DownloadFailed {
                url,
                reason: "timeout".into(),
            },
            CrawlEvent::Cancelled,
        ];

        let sink = RecordingSink::default();
        for event in &events {
            sink.event(event);
        }
        assert_eq!(sink.events.lock().unwrap().len(), events.len());

        let null = NullSink;
        for event in &events {
            null.event(event);
        }
    }
}
