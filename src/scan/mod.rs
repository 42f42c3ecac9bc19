//! Folder listing for the File Set

use crate::error::MergeError;
use std::ffi::OsString;
use std::path::Path;

pub mod scanner;

pub use scanner::{FolderScanner, ScanStats};

/// Names of the regular files directly inside `folder`, sorted.
pub fn list_files(folder: &Path) -> Result<Vec<OsString>, MergeError> {
    FolderScanner::new(folder.to_path_buf()).scan()
}

/// True when `path` names a regular file, following symlinks.
pub fn is_regular_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}
