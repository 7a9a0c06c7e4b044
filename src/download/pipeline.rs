use crate::category::Category;
use crate::download::filename::{derive_filename, extension_of};
use crate::events::{CrawlEvent, ProgressSink};
use crate::storage::{Storage, StorageError, StorageWriter};
use futures_util::StreamExt;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of one download attempt
///
/// Every variant is a normal, non-fatal outcome; the crawl never stops
/// because of a download.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The file was written to storage
    Completed {
        filename: String,
        category: Category,
        bytes: u64,
    },

    /// A file already occupies the destination; nothing was fetched
    DuplicateSkipped { filename: String },

    /// The download failed and was abandoned
    Failed { url: Url, reason: String },
}

/// Downloads a single file into storage
///
/// Pipeline steps, each with its failure policy:
///
/// 1. Derive and sanitize the filename from the URL path (fallback name on
///    an empty result).
/// 2. Classify the filename's extension to pick the category.
/// 3. Skip entirely if the destination exists - a normal outcome, reported
///    as a duplicate. Losing the claim race to a concurrent download of
///    the same destination lands here too.
/// 4. Streamed GET with the file timeout. This path never retries; a
///    failure abandons this one file.
/// 5. Chunks are appended through the storage writer, so memory use is
///    independent of file size; the writer publishes the file only on
///    commit.
///
/// Any failure aborts the writer (releasing the claim, removing partial
/// data) and returns `Failed`; nothing propagates to the caller as an
/// error.
pub async fn download_file(
    client: &Client,
    file_url: &Url,
    timeout: Duration,
    storage: &dyn Storage,
    sink: &dyn ProgressSink,
) -> DownloadOutcome {
    let filename = derive_filename(file_url);
    let extension = extension_of(&filename).unwrap_or_default();
    let category = Category::from_extension(&extension);

    sink.event(&CrawlEvent::FileFound {
        url: file_url.clone(),
        filename: filename.clone(),
    });

    if storage.exists(category, &filename) {
        sink.event(&CrawlEvent::FileSkipped {
            filename: filename.clone(),
        });
        return DownloadOutcome::DuplicateSkipped { filename };
    }

    let mut writer = match storage.begin_write(category, &filename).await {
        Ok(writer) => writer,
        Err(StorageError::DestinationExists(_)) => {
            sink.event(&CrawlEvent::FileSkipped {
                filename: filename.clone(),
            });
            return DownloadOutcome::DuplicateSkipped { filename };
        }
        Err(e) => {
            let reason = e.to_string();
            sink.event(&CrawlEvent::DownloadFailed {
                url: file_url.clone(),
                reason: reason.clone(),
            });
            return DownloadOutcome::Failed {
                url: file_url.clone(),
                reason,
            };
        }
    };

    match stream_body(client, file_url, timeout, writer.as_mut()).await {
        Ok(()) => match writer.commit().await {
            Ok(bytes) => {
                sink.event(&CrawlEvent::FileDownloaded {
                    filename: filename.clone(),
                    category,
                    bytes,
                });
                DownloadOutcome::Completed {
                    filename,
                    category,
                    bytes,
                }
            }
            Err(e) => {
                let reason = format!("commit failed: {}", e);
                writer.abort().await;
                sink.event(&CrawlEvent::DownloadFailed {
                    url: file_url.clone(),
                    reason: reason.clone(),
                });
                DownloadOutcome::Failed {
                    url: file_url.clone(),
                    reason,
                }
            }
        },
        Err(reason) => {
            writer.abort().await;
            sink.event(&CrawlEvent::DownloadFailed {
                url: file_url.clone(),
                reason: reason.clone(),
            });
            DownloadOutcome::Failed {
                url: file_url.clone(),
                reason,
            }
        }
    }
}

/// Streams the response body into the writer, chunk by chunk
async fn stream_body(
    client: &Client,
    file_url: &Url,
    timeout: Duration,
    writer: &mut dyn StorageWriter,
) -> Result<(), String> {
    let response = client
        .get(file_url.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| format!("request failed: {}", e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {}", status));
    }

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| format!("body read failed: {}", e))?;
        writer
            .write_chunk(&chunk)
            .await
            .map_err(|e| format!("write failed: {}", e))?;
    }

    Ok(())
}

// Exercised end-to-end with wiremock servers and a tempdir-backed storage
// in the integration tests.
