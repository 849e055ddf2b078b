//! Utility helpers used across the crate.
//!
//! Range planning, HTTP metadata probing, resource-name extraction, part
//! file naming, and post-download integrity verification.
use crate::error::{DownloadError, FetchError};
use anyhow::{Result, anyhow};
use percent_encoding::percent_decode_str;
use reqwest::header::CONTENT_LENGTH;
use sanitize_filename::sanitize;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::{Path, PathBuf};
use url::Url;

/// One contiguous byte range of the remote resource.
///
/// Bounds are inclusive, matching HTTP `Range: bytes=start-end` semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpec {
    /// Position of this chunk in the reassembly order.
    pub index: usize,
    /// The starting byte offset (0-based).
    pub start: u64,
    /// The ending byte offset (inclusive).
    pub end: u64,
}

/// Metadata learned from the HEAD probe.
#[derive(Debug, Clone, Copy)]
pub struct ContentMetadata {
    /// Total resource length in bytes, when the server reports one.
    pub total_length: Option<u64>,
}

/// Splits `total_length` bytes into `concurrency` contiguous chunks.
///
/// Each chunk spans `[n*chunk_size + n, (n+1)*chunk_size + n]` where
/// `chunk_size = total_length / concurrency`. The stagger keeps adjacent
/// chunks contiguous despite integer truncation; the final chunk's upper
/// bound may point past the end of the resource, in which case the server
/// truncates its Range response.
///
/// # Errors
///
/// Returns an error if `concurrency` is zero, if the resource is empty,
/// or if it is smaller than the fan-out factor (which would produce
/// inverted ranges).
pub fn plan_chunks(total_length: u64, concurrency: u8) -> Result<Vec<ChunkSpec>, DownloadError> {
    if concurrency == 0 {
        return Err(DownloadError::Plan("concurrency must be at least 1"));
    }
    if total_length == 0 {
        return Err(DownloadError::Plan("cannot split an empty resource"));
    }
    let fan_out = u64::from(concurrency);
    if total_length < fan_out {
        return Err(DownloadError::Plan(
            "resource is smaller than the fan-out factor",
        ));
    }

    let chunk_size = total_length / fan_out;
    let mut chunks = Vec::with_capacity(concurrency as usize);

    for n in 0..fan_out {
        chunks.push(ChunkSpec {
            index: n as usize,
            start: n * chunk_size + n,
            end: (n + 1) * chunk_size + n,
        });
    }

    Ok(chunks)
}

/// Fetches the resource metadata with a header-only HEAD request.
///
/// A missing or malformed `Content-Length` header is reported as
/// `total_length: None` rather than an error; deciding whether that is
/// terminal belongs to the coordinator.
///
/// # Errors
///
/// Returns an error if the network request fails or the server answers
/// with a non-success status code.
pub async fn probe_metadata(
    url: &str,
    client: &reqwest::Client,
) -> Result<ContentMetadata, FetchError> {
    let response = client.head(url).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let total_length = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());

    Ok(ContentMetadata { total_length })
}

/// Path of the part file holding one chunk's bytes.
pub fn part_path(dir: &Path, resource_name: &str, index: usize) -> PathBuf {
    dir.join(format!("{resource_name}.part{index}"))
}

/// Extracts a clean resource name from a URL.
///
/// Takes the last path segment, URL-decodes it, sanitizes characters the
/// OS rejects, and falls back to "output.bin" when the URL has no usable
/// segment.
pub fn resource_name_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .map(|mut s| s.next_back().unwrap_or("").to_string())
        })
        .map(|s| percent_decode_str(&s).decode_utf8_lossy().to_string())
        .map(sanitize)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "output.bin".to_string())
}

/// Calculates the SHA-256 hash of a file and compares it to an expected hash.
///
/// # Errors
///
/// Returns an `Err` if the hashes do not match or the file cannot be read.
pub fn verify_file_integrity(path: &str, expected_hash: &str) -> Result<()> {
    println!("Verifying file integrity...");

    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0; 8192];

    loop {
        let count = file.read(&mut buffer)?;
        if count == 0 {
            break;
        }
        hasher.update(&buffer[..count]);
    }

    let actual_hash = hex::encode(hasher.finalize());

    if actual_hash == expected_hash.to_lowercase() {
        println!("✅ Integrity Check PASSED!");
        Ok(())
    } else {
        println!("❌ Integrity Check FAILED!");
        println!("Expected: {}", expected_hash);
        println!("Actual:   {}", actual_hash);
        Err(anyhow!("File corruption detected: Hash mismatch"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_plan_chunks_even_split() {
        // 600 bytes, 6 chunks -> chunk_size 100, staggered by index
        let chunks = plan_chunks(600, 6).unwrap();
        assert_eq!(chunks.len(), 6);

        assert_eq!(chunks[0], ChunkSpec { index: 0, start: 0, end: 100 });
        assert_eq!(chunks[1], ChunkSpec { index: 1, start: 101, end: 201 });
        assert_eq!(chunks[5], ChunkSpec { index: 5, start: 505, end: 605 });
    }

    #[test]
    fn test_plan_chunks_contiguous_coverage() {
        for (total, concurrency) in [(600u64, 6u8), (100, 3), (1000, 7), (10 * 1024 * 1024, 6)] {
            let chunks = plan_chunks(total, concurrency).unwrap();
            assert_eq!(chunks.len(), concurrency as usize);
            assert_eq!(chunks[0].start, 0);

            // No gaps, no overlaps: each chunk starts right after its predecessor.
            for pair in chunks.windows(2) {
                assert_eq!(pair[1].start, pair[0].end + 1);
            }

            // The plan reaches the last byte; any overshoot is truncated by
            // the server's Range response.
            assert!(chunks.last().unwrap().end >= total - 1);
        }
    }

    #[test]
    fn test_plan_chunks_remainder() {
        // 100 bytes, 3 chunks -> chunk_size 33, ranges 0-33, 34-67, 68-101
        let chunks = plan_chunks(100, 3).unwrap();
        assert_eq!(chunks[0].end, 33);
        assert_eq!(chunks[1].start, 34);
        assert_eq!(chunks[2].start, 68);
        assert_eq!(chunks[2].end, 101);
    }

    #[test]
    fn test_plan_chunks_rejects_degenerate_input() {
        assert!(plan_chunks(600, 0).is_err());
        assert!(plan_chunks(0, 6).is_err());
        // Fewer bytes than chunks would produce inverted ranges.
        assert!(plan_chunks(5, 6).is_err());
    }

    #[test]
    fn test_part_path_naming() {
        let path = part_path(Path::new("/tmp/scratch"), "archive.zip", 3);
        assert_eq!(path, PathBuf::from("/tmp/scratch/archive.zip.part3"));
    }

    #[test]
    fn test_verify_integrity() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "Hello Rust")?;

        // "Hello Rust" SHA-256 hash
        let expected_hash = "DC5D63134FB696626C4BF28E1232434AB040ACC10A66CFEE55DACDD70DAE82A3";

        let path = temp_file.path().to_str().unwrap();
        assert!(verify_file_integrity(path, expected_hash).is_ok());
        assert!(verify_file_integrity(path, "badhash123").is_err());

        Ok(())
    }

    #[test]
    fn test_resource_name_extraction() {
        assert_eq!(
            resource_name_from_url("https://example.com/archive.zip"),
            "archive.zip"
        );

        // Query parameters are not part of the name.
        assert_eq!(
            resource_name_from_url("https://example.com/image.png?id=123&quality=high"),
            "image.png"
        );

        // URL encoding is decoded.
        assert_eq!(
            resource_name_from_url("https://example.com/my%20vacation%20photo.jpg"),
            "my vacation photo.jpg"
        );

        // No filename (ends in slash).
        assert_eq!(resource_name_from_url("https://example.com/"), "output.bin");
    }
}
