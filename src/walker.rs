use std::path::{Path, PathBuf};

use crate::error::Result;

/// Recursively enumerate every regular file under `root`, sorted by
/// path for a stable ingestion order.
///
/// Directories are descended into, never treated as documents. Other
/// non-regular entries (sockets, broken symlinks) are skipped.
pub fn discover_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk_dir(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            walk_dir(&entry.path(), files)?;
        } else if file_type.is_file() {
            files.push(entry.path());
        }
    }

    Ok(())
}
