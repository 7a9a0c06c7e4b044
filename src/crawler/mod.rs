//! Crawler module: traversal and retrieval engine
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with bounded retries
//! - HTML reference extraction and classification
//! - Frontier management (FIFO queue plus visited set)
//! - Overall crawl coordination and lifecycle

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{CancelFlag, Coordinator, CrawlPhase, CrawlSummary, CrawlTarget};
pub use fetcher::{build_http_client, fetch_page, is_html_content_type, FetchOutcome, RetryPolicy};
pub use frontier::Frontier;
pub use parser::{extract_references, ExtractedRefs};
