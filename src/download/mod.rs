//! File download pipeline
//!
//! Given a file URL discovered during extraction, this module derives a
//! safe filename, resolves its storage category, skips pre-existing
//! destinations, and streams the body into storage in bounded chunks.
//! Download failures are per-file outcomes, never crawl-level errors.

mod filename;
mod pipeline;

pub use filename::{derive_filename, extension_of, sanitize_filename, FALLBACK_FILENAME};
pub use pipeline::{download_file, DownloadOutcome};
