//! Error types for the download pipeline.
//!
//! The worker reports `FetchError`s; the coordinator tags them with the
//! failing chunk index and folds everything into `DownloadError`, which is
//! the single failure type surfaced to callers.
use thiserror::Error;

/// A failure while fetching a single chunk.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request itself failed (connect, TLS, read, timeout).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// Writing the part file failed.
    #[error("failed to write part file: {0}")]
    Io(#[from] std::io::Error),

    /// The fetch was cancelled because a sibling chunk failed or the
    /// user interrupted the download.
    #[error("fetch cancelled")]
    Cancelled,

    /// The spawned fetch task panicked or was aborted.
    #[error("fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Terminal failure of a whole download operation.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The metadata probe reported no usable content length.
    #[error("the server did not report a content length")]
    LengthUnknown,

    /// The metadata probe itself failed.
    #[error("metadata probe failed: {0}")]
    Probe(#[source] FetchError),

    /// The requested segmentation cannot be satisfied.
    #[error("invalid chunk plan: {0}")]
    Plan(&'static str),

    /// The per-download temporary directory could not be created.
    #[error("failed to create download workspace: {0}")]
    Workspace(#[source] std::io::Error),

    /// A chunk fetch failed; the whole download is discarded.
    #[error("chunk {index} failed: {source}")]
    Transport {
        index: usize,
        #[source]
        source: FetchError,
    },

    /// Concatenating the parts into the final file failed.
    #[error("failed to merge parts: {0}")]
    Merge(#[source] std::io::Error),
}
