//! Local filesystem discovery of fetched wave files
//!
//! Remote retrieval is a separate concern; by the time the loader runs, the
//! `.wls` files sit in a per-station directory. This adapter enumerates
//! them in a stable order and removes them after successful processing when
//! asked to.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::constants::WLS_EXTENSION;
use crate::{Error, Result};

/// Find `.wls` files under a directory (or accept a single file path),
/// sorted by filename so batches replay deterministically.
pub fn find_wls_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(Error::configuration(format!(
            "Input path does not exist: {}",
            input.display()
        )));
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(input).min_depth(1).max_depth(2) {
        let entry = entry.map_err(|e| {
            Error::configuration(format!("Failed to walk {}: {}", input.display(), e))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(WLS_EXTENSION))
        {
            files.push(path);
        } else {
            debug!("Ignoring non-wls file {}", path.display());
        }
    }

    files.sort();
    Ok(files)
}

/// Delete a processed file, logging rather than failing when removal is
/// not possible.
pub fn remove_processed(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Removed processed file {}", path.display()),
        Err(e) => warn!("Could not remove {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_finds_only_wls_files_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.wls"), "").unwrap();
        std::fs::write(dir.path().join("a.wls"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = find_wls_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.wls", "b.wls"]);
    }

    #[test]
    fn test_single_file_path_is_accepted_verbatim() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("only.wls");
        std::fs::write(&file, "").unwrap();

        let files = find_wls_files(&file).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let result = find_wls_files(Path::new("/nonexistent/dir"));
        assert!(result.is_err());
    }

    #[test]
    fn test_remove_processed_tolerates_missing_file() {
        // Must not panic or error when the file is already gone
        remove_processed(Path::new("/nonexistent/file.wls"));
    }
}
