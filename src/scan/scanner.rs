//! Single-level folder scanner

use crate::error::MergeError;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Counters collected during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_found: usize,
    pub dirs_skipped: usize,
    pub entries_unreadable: usize,
}

/// Lists the regular files directly inside a folder.
///
/// Subdirectories are not descended into. Symlinks are resolved so a link to
/// a file counts as a file; dangling links are skipped.
pub struct FolderScanner {
    root_path: PathBuf,
    stats: ScanStats,
}

impl FolderScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path, stats: ScanStats::default() }
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// Scan the folder and return file names in byte-wise sorted order.
    ///
    /// Failing to open the folder itself is an error; a bad entry inside it
    /// is logged and skipped.
    pub fn scan(&mut self) -> Result<Vec<OsString>, MergeError> {
        self.stats = ScanStats::default();

        match self.root_path.metadata() {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(MergeError::Read {
                    path: self.root_path.clone(),
                    source: io::Error::other("not a directory"),
                });
            }
            Err(source) => return Err(MergeError::Read { path: self.root_path.clone(), source }),
        }

        let walker = WalkDir::new(&self.root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut names = Vec::new();
        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(MergeError::Read {
                        path: self.root_path.clone(),
                        source: io::Error::from(err),
                    });
                }
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", self.root_path.display(), err);
                    self.stats.entries_unreadable += 1;
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                self.stats.dirs_skipped += 1;
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            self.stats.files_found += 1;
            names.push(entry.file_name().to_os_string());
        }

        tracing::debug!(
            "Scanned {}: {} files, {} directories skipped",
            self.root_path.display(),
            self.stats.files_found,
            self.stats.dirs_skipped
        );
        Ok(names)
    }
}
