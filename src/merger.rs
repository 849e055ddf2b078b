//! Reassembly of part files into the final download.
use crate::cleaner;
use crate::utils::part_path;
use std::io;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};

/// Read buffer for streaming a part into the destination.
const COPY_BUFFER_SIZE: usize = 8192;

/// Concatenates part files into `final_path` in ascending index order.
///
/// Index order is what guarantees byte-correct reconstruction: a chunk's
/// index equals its position in the original byte range. Each part is
/// deleted as soon as it has been fully consumed, so disk usage never
/// doubles for data that is already merged.
///
/// # Errors
///
/// Returns the first I/O error encountered while reading, appending, or
/// removing a part. The partially-written final file is left in place for
/// the caller to discard.
pub async fn merge_parts(
    final_path: &Path,
    parts_dir: &Path,
    resource_name: &str,
    indices: &[usize],
) -> io::Result<()> {
    let file = tokio::fs::File::create(final_path).await?;
    let mut writer = BufWriter::new(file);
    let mut buffer = [0u8; COPY_BUFFER_SIZE];

    for &index in indices {
        let path = part_path(parts_dir, resource_name, index);
        let mut part = tokio::fs::File::open(&path).await?;

        loop {
            let count = part.read(&mut buffer).await?;
            if count == 0 {
                break;
            }
            writer.write_all(&buffer[..count]).await?;
        }

        drop(part);
        cleaner::delete_if_exists(&path).await?;
    }

    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_merge_stitches_parts_in_index_order() {
        let parts = tempdir().unwrap();
        let out = tempdir().unwrap();
        let final_path = out.path().join("greeting.txt");

        for (index, piece) in ["Hello", " ", "World"].iter().enumerate() {
            let path = part_path(parts.path(), "greeting.txt", index);
            tokio::fs::write(&path, piece).await.unwrap();
        }

        merge_parts(&final_path, parts.path(), "greeting.txt", &[0, 1, 2])
            .await
            .unwrap();

        let merged = tokio::fs::read_to_string(&final_path).await.unwrap();
        assert_eq!(merged, "Hello World");

        // Every part is consumed and removed, not deferred to a final sweep.
        for index in 0..3 {
            assert!(!part_path(parts.path(), "greeting.txt", index).exists());
        }
    }

    #[tokio::test]
    async fn test_merge_missing_part_fails_and_keeps_partial_file() {
        let parts = tempdir().unwrap();
        let out = tempdir().unwrap();
        let final_path = out.path().join("broken.bin");

        // Part 1 is missing.
        tokio::fs::write(part_path(parts.path(), "broken.bin", 0), b"aaaa")
            .await
            .unwrap();
        tokio::fs::write(part_path(parts.path(), "broken.bin", 2), b"cccc")
            .await
            .unwrap();

        let result = merge_parts(&final_path, parts.path(), "broken.bin", &[0, 1, 2]).await;
        assert!(result.is_err());

        // The partial output stays for the caller to discard, and the
        // unconsumed part is untouched.
        assert!(final_path.exists());
        assert!(part_path(parts.path(), "broken.bin", 2).exists());
    }
}
