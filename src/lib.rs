//! Magpie: a domain-scoped file-harvesting crawler
//!
//! This crate crawls a single web domain breadth-first from a seed URL,
//! downloads files whose extension matches a caller-selected target set,
//! and sorts them into category directories (pdf, docs, ppt, xls, zip,
//! images, others).

pub mod category;
pub mod config;
pub mod crawler;
pub mod download;
pub mod events;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for magpie operations
///
/// Per-URL and per-file failures during a crawl are *outcomes*
/// ([`crawler::FetchOutcome`], [`download::DownloadOutcome`]), not errors.
/// This type covers the failures that prevent a crawl from starting or
/// that indicate the process itself is broken.
#[derive(Debug, Error)]
pub enum MagpieError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for magpie operations
pub type Result<T> = std::result::Result<T, MagpieError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use category::Category;
pub use config::Config;
pub use crawler::{CancelFlag, Coordinator, CrawlPhase, CrawlSummary, CrawlTarget};
pub use events::{CrawlEvent, ProgressSink};
pub use self::url::{extract_domain, resolve_reference, Mode, TargetSet};
