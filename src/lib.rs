//! # sget Download Library
//!
//! `segmented_downloader` performs concurrent, segmented file downloads.
//! It:
//! - Probes the content length with a header-only request
//! - Splits the byte range into contiguous chunks
//! - Downloads every chunk in parallel into isolated part files
//! - Stitches the parts back together in order, or discards everything
//!   on the first failure (strict all-or-nothing)
//!
//! ## Example Usage
//!
//! Note: This library is primarily designed to be used by the binary, but
//! the internal components are exposed for custom implementations. See
//! `demos/simple_download.rs` for a complete program.

pub mod args;
pub mod cleaner;
pub mod config;
pub mod downloader;
pub mod error;
pub mod merger;
pub mod observer;
pub mod utils;
pub mod worker;

pub use args::Args;
pub use downloader::{DEFAULT_CONCURRENCY, download};
pub use error::{DownloadError, FetchError};
pub use observer::{ConsoleObserver, DownloadObserver};
pub use utils::{ChunkSpec, ContentMetadata, plan_chunks};
