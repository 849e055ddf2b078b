//! Best-effort removal of temporary download artifacts.
use crate::utils::part_path;
use std::io;
use std::path::Path;

/// Deletes a file, treating an already-missing path as success.
///
/// Failure paths can race with or precede part file creation, so absence
/// is a no-op rather than an error.
///
/// # Errors
///
/// Returns any I/O error other than `NotFound`.
pub async fn delete_if_exists(path: &Path) -> io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Sweeps every expected part file for a failed download.
///
/// Attempts all indices regardless of which parts actually made it to
/// disk. Individual deletion failures are swallowed; cleanup is
/// best-effort by contract.
pub async fn sweep_parts(dir: &Path, resource_name: &str, indices: &[usize]) {
    for &index in indices {
        let path = part_path(dir, resource_name, index);
        let _ = delete_if_exists(&path).await;
    }
}
