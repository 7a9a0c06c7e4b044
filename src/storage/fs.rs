//! Filesystem storage backend
//!
//! Lays downloads out as `<root>/<category>/<filename>`. A write first
//! claims `<filename>.part` with an exclusive create, streams chunks into
//! it, and renames onto the final path on commit. Losing the create race
//! surfaces as [`StorageError::DestinationExists`], which the download
//! pipeline treats as a duplicate skip.

use crate::category::Category;
use crate::storage::traits::{Storage, StorageError, StorageResult, StorageWriter};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};

/// Storage backend writing to category directories on the local filesystem
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Creates the backend and bootstraps the directory layout
    ///
    /// The root and one subdirectory per category are created if missing.
    pub fn new(root: &Path) -> StorageResult<Self> {
        if root.as_os_str().is_empty() {
            return Err(StorageError::InvalidRoot(
                "download root cannot be empty".to_string(),
            ));
        }

        std::fs::create_dir_all(root)?;
        for category in Category::ALL {
            std::fs::create_dir_all(root.join(category.dir_name()))?;
        }

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// The configured download root
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn destination(&self, category: Category, filename: &str) -> PathBuf {
        self.root.join(category.dir_name()).join(filename)
    }
}

/// Rejects names that could escape the category directory
///
/// The download pipeline sanitizes filenames before they reach storage;
/// this is the backend's own invariant, independent of the caller.
fn check_filename(filename: &str) -> StorageResult<()> {
    if filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(StorageError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}

#[async_trait]
impl Storage for FsStorage {
    fn exists(&self, category: Category, filename: &str) -> bool {
        if check_filename(filename).is_err() {
            return false;
        }
        self.destination(category, filename).exists()
    }

    async fn begin_write(
        &self,
        category: Category,
        filename: &str,
    ) -> StorageResult<Box<dyn StorageWriter>> {
        check_filename(filename)?;

        let final_path = self.destination(category, filename);
        if final_path.exists() {
            return Err(StorageError::DestinationExists(filename.to_string()));
        }

        let mut part_path = final_path.clone().into_os_string();
        part_path.push(".part");
        let part_path = PathBuf::from(part_path);

        // Exclusive create is the claim; a concurrent writer for the same
        // destination gets AlreadyExists here.
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&part_path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::DestinationExists(filename.to_string()));
            }
            Err(e) => return Err(StorageError::Io(e)),
        };

        Ok(Box::new(FsWriter {
            file: Some(BufWriter::new(file)),
            part_path,
            final_path,
            bytes: 0,
        }))
    }
}

/// In-progress write backed by a `.part` file
struct FsWriter {
    file: Option<BufWriter<File>>,
    part_path: PathBuf,
    final_path: PathBuf,
    bytes: u64,
}

#[async_trait]
impl StorageWriter for FsWriter {
    async fn write_chunk(&mut self, chunk: &[u8]) -> StorageResult<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| StorageError::Io(std::io::Error::other("writer already finished")))?;
        file.write_all(chunk).await?;
        self.bytes += chunk.len() as u64;
        Ok(())
    }

    async fn commit(&mut self) -> StorageResult<u64> {
        let mut file = self
            .file
            .take()
            .ok_or_else(|| StorageError::Io(std::io::Error::other("writer already finished")))?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&self.part_path, &self.final_path).await?;
        Ok(self.bytes)
    }

    async fn abort(&mut self) {
        drop(self.file.take());
        let _ = tokio::fs::remove_file(&self.part_path).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage() -> (TempDir, FsStorage) {
        let dir = TempDir::new().unwrap();
        let storage = FsStorage::new(dir.path()).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_new_bootstraps_category_layout() {
        let (dir, _storage) = storage();
        for category in Category::ALL {
            assert!(
                dir.path().join(category.dir_name()).is_dir(),
                "missing {} directory",
                category
            );
        }
    }

    #[tokio::test]
    async fn test_write_commit_lands_at_destination() {
        let (dir, storage) = storage();

        let mut writer = storage.begin_write(Category::Pdf, "report.pdf").await.unwrap();
        writer.write_chunk(b"%PDF-").await.unwrap();
        writer.write_chunk(b"1.7").await.unwrap();
        let bytes = writer.commit().await.unwrap();

        assert_eq!(bytes, 8);
        let final_path = dir.path().join("pdf").join("report.pdf");
        assert_eq!(std::fs::read(&final_path).unwrap(), b"%PDF-1.7");
        assert!(!dir.path().join("pdf").join("report.pdf.part").exists());
        assert!(storage.exists(Category::Pdf, "report.pdf"));
    }

    #[tokio::test]
    async fn test_begin_write_rejects_existing_destination() {
        let (_dir, storage) = storage();

        let mut writer = storage.begin_write(Category::Docs, "notes.txt").await.unwrap();
        writer.write_chunk(b"hello").await.unwrap();
        writer.commit().await.unwrap();

        let second = storage.begin_write(Category::Docs, "notes.txt").await;
        assert!(matches!(second, Err(StorageError::DestinationExists(_))));
    }

    #[tokio::test]
    async fn test_concurrent_claim_goes_to_one_writer() {
        let (_dir, storage) = storage();

        let first = storage.begin_write(Category::Zip, "bundle.zip").await;
        let second = storage.begin_write(Category::Zip, "bundle.zip").await;

        assert!(first.is_ok());
        assert!(matches!(second, Err(StorageError::DestinationExists(_))));
    }

    #[tokio::test]
    async fn test_abort_leaves_no_trace() {
        let (dir, storage) = storage();

        let mut writer = storage.begin_write(Category::Images, "photo.jpg").await.unwrap();
        writer.write_chunk(b"partial data").await.unwrap();
        writer.abort().await;

        assert!(!dir.path().join("images").join("photo.jpg").exists());
        assert!(!dir.path().join("images").join("photo.jpg.part").exists());
        assert!(!storage.exists(Category::Images, "photo.jpg"));

        // The claim is released; a retry can start over.
        assert!(storage.begin_write(Category::Images, "photo.jpg").await.is_ok());
    }

    #[tokio::test]
    async fn test_path_escaping_filenames_rejected() {
        let (_dir, storage) = storage();

        for bad in ["", ".", "..", "a/b.pdf", "a\\b.pdf"] {
            let result = storage.begin_write(Category::Others, bad).await;
            assert!(
                matches!(result, Err(StorageError::InvalidFilename(_))),
                "expected rejection for {:?}",
                bad
            );
            assert!(!storage.exists(Category::Others, bad));
        }
    }
}
