//! Configuration module for magpie
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every field has a default, so a crawl can run without any config
//! file at all.
//!
//! # Example
//!
//! ```no_run
//! use magpie::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("magpie.toml")).unwrap();
//! println!("Retry attempts: {}", config.crawler.retry_attempts);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, HttpConfig, OutputConfig};
pub use validation::validate;
