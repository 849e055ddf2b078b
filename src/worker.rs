//! The chunk fetch worker.
//!
//! Each worker downloads exactly one byte range into its own part file.
//! Workers never retry and never clean up after themselves; aggregation
//! and cleanup are the coordinator's job.
use crate::error::FetchError;
use crate::utils::{ChunkSpec, part_path};
use reqwest::header::RANGE;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};

/// Downloads a single chunk into `<dest_dir>/<resource_name>.part<index>`.
///
/// The response body is streamed through a buffered writer in
/// transport-sized pieces, so peak memory stays bounded regardless of
/// chunk size. Exactly one file is created; on failure the partial part
/// file is left for the coordinator's sweep.
///
/// # Errors
///
/// Returns a `FetchError` if the request fails, the server answers with a
/// non-success status, or writing the part file fails.
pub async fn fetch_chunk(
    url: &str,
    chunk: ChunkSpec,
    dest_dir: &Path,
    resource_name: &str,
    client: &reqwest::Client,
) -> Result<PathBuf, FetchError> {
    let range_header = format!("bytes={}-{}", chunk.start, chunk.end);

    let mut response = client.get(url).header(RANGE, range_header).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let path = part_path(dest_dir, resource_name, chunk.index);
    let file = tokio::fs::File::create(&path).await?;
    let mut writer = BufWriter::new(file);

    while let Some(bytes) = response.chunk().await? {
        writer.write_all(&bytes).await?;
    }

    // Ensure all bytes hit the disk before the chunk is reported done
    writer.flush().await?;

    Ok(path)
}
