//! The download coordinator.
//!
//! Drives one download end to end: probe, plan, fan out chunk fetches,
//! fan in, then merge or clean up. The contract is strictly
//! all-or-nothing; a single failed chunk discards the whole download.
use crate::error::{DownloadError, FetchError};
use crate::observer::DownloadObserver;
use crate::utils::{self, ChunkSpec};
use crate::{cleaner, merger, worker};
use futures_util::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Default number of concurrent range requests.
pub const DEFAULT_CONCURRENCY: u8 = 6;

/// Downloads `url` into `output_path` using `concurrency` parallel range
/// requests.
///
/// Phases: probe the content length, plan the chunk ranges, fetch every
/// chunk concurrently into a scoped temporary directory, then stitch the
/// parts together in index order. If any chunk fails, the remaining
/// fetches are cancelled through `cancel_token`, all parts are swept, and
/// the first real failure is returned. The temporary directory is removed
/// on every exit path.
///
/// # Errors
///
/// Returns a `DownloadError` describing the terminal failure; no partial
/// output file is produced except for the documented mid-merge case.
pub async fn download(
    url: &str,
    output_path: &Path,
    concurrency: u8,
    client: &reqwest::Client,
    observer: Arc<dyn DownloadObserver>,
    cancel_token: CancellationToken,
) -> Result<PathBuf, DownloadError> {
    // 1. Recon: a single header-only probe. No length, no download.
    let metadata = utils::probe_metadata(url, client)
        .await
        .map_err(DownloadError::Probe)?;

    let Some(total_length) = metadata.total_length.filter(|&length| length > 0) else {
        return Err(DownloadError::LengthUnknown);
    };
    observer.message(&format!("File size: {} bytes", total_length));

    // 2. Plan the byte ranges before touching the filesystem.
    let chunks = utils::plan_chunks(total_length, concurrency)?;
    let indices: Vec<usize> = chunks.iter().map(|chunk| chunk.index).collect();

    // 3. Scoped workspace; dropped (and therefore removed) on every path out.
    let temp_dir = TempDir::new().map_err(DownloadError::Workspace)?;
    let resource_name = utils::resource_name_from_url(url);

    observer.message("Download started..");
    observer.started(chunks.len() as u64);

    // 4. Fan out one fetch task per chunk.
    let mut tasks = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        tasks.push(spawn_fetch(
            chunk,
            url.to_string(),
            temp_dir.path().to_path_buf(),
            resource_name.clone(),
            client.clone(),
            observer.clone(),
            cancel_token.clone(),
        ));
    }

    // 5. Fan in. All-or-nothing: collect every outcome, keep the first
    // failure that is not a knock-on cancellation.
    let results = join_all(tasks).await;

    let mut failure: Option<DownloadError> = None;
    for (index, joined) in indices.iter().copied().zip(results) {
        let result = match joined {
            Ok(result) => result,
            Err(join_error) => Err(FetchError::Join(join_error)),
        };

        if let Err(source) = result {
            let replace = match &failure {
                None => true,
                Some(DownloadError::Transport {
                    source: FetchError::Cancelled,
                    ..
                }) => !matches!(source, FetchError::Cancelled),
                Some(_) => false,
            };
            if replace {
                failure = Some(DownloadError::Transport { index, source });
            }
        }
    }

    // 6. Merge on full success, sweep on any failure.
    if let Some(error) = failure {
        observer.message("Download failed, removing part files..");
        cleaner::sweep_parts(temp_dir.path(), &resource_name, &indices).await;
        let _ = temp_dir.close();
        return Err(error);
    }

    observer.message("Merging parts..");
    merger::merge_parts(output_path, temp_dir.path(), &resource_name, &indices)
        .await
        .map_err(DownloadError::Merge)?;

    observer.finish();
    let _ = temp_dir.close();

    Ok(output_path.to_path_buf())
}

/// Spawns one chunk fetch, racing it against cancellation.
///
/// The first real failure cancels the shared token so sibling fetches
/// stop wasting bandwidth on a download that is already lost.
fn spawn_fetch(
    chunk: ChunkSpec,
    url: String,
    dest_dir: PathBuf,
    resource_name: String,
    client: reqwest::Client,
    observer: Arc<dyn DownloadObserver>,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<Result<PathBuf, FetchError>> {
    tokio::spawn(async move {
        let result = tokio::select! {
            () = cancel_token.cancelled() => Err(FetchError::Cancelled),
            result = worker::fetch_chunk(&url, chunk, &dest_dir, &resource_name, &client) => result,
        };

        match &result {
            Ok(_) => observer.chunk_done(chunk.index),
            Err(_) if !cancel_token.is_cancelled() => cancel_token.cancel(),
            Err(_) => {}
        }

        result
    })
}
