//! Storage module for magpie
//!
//! Downloaded files are persisted through the [`Storage`] trait so the
//! crawl engine never touches paths directly. The provided backend lays
//! files out as `<root>/<category>/<filename>` on the local filesystem.

mod fs;
mod traits;

pub use fs::FsStorage;
pub use traits::{Storage, StorageError, StorageResult, StorageWriter};
