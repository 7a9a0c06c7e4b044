//! Storage traits and error types

use crate::category::Category;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Destination already exists: {0}")]
    DestinationExists(String),

    #[error("Invalid filename: {0:?}")]
    InvalidFilename(String),

    #[error("Invalid storage root: {0}")]
    InvalidRoot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for download storage backends
///
/// A backend persists named byte streams under a category. Claiming a
/// destination and writing to it are split so the engine can stream
/// response bodies chunk by chunk without buffering whole files.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns true if a file already exists at the destination
    ///
    /// Used for the cheap duplicate check before any network traffic.
    /// The authoritative claim happens in [`Storage::begin_write`], which
    /// must be safe against concurrent callers racing for the same path.
    fn exists(&self, category: Category, filename: &str) -> bool;

    /// Claims the destination path and opens a writer for it
    ///
    /// Returns [`StorageError::DestinationExists`] if the destination is
    /// already present or another writer currently holds the claim. The
    /// claim must be exclusive: two concurrent `begin_write` calls for the
    /// same destination may both run, but at most one receives a writer.
    async fn begin_write(
        &self,
        category: Category,
        filename: &str,
    ) -> StorageResult<Box<dyn StorageWriter>>;
}

/// An in-progress write to a claimed destination
///
/// Data lands at a temporary location until [`StorageWriter::commit`]
/// moves it to the final path, so an aborted or crashed download never
/// leaves a partial file at the destination.
#[async_trait]
pub trait StorageWriter: Send {
    /// Appends a chunk to the in-progress write
    async fn write_chunk(&mut self, chunk: &[u8]) -> StorageResult<()>;

    /// Finishes the write and moves it to the final destination
    ///
    /// Returns the total number of bytes written.
    async fn commit(&mut self) -> StorageResult<u64>;

    /// Discards the write and releases the claim
    async fn abort(&mut self);
}
