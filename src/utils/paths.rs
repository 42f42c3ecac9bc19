//! Path normalization

use serde::ser::{SerializeSeq, Serializer};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub fn normalize_path(path: &Path) -> String {
    // Convert backslashes to forward slashes so reports read the same everywhere
    path.to_string_lossy().replace('\\', "/")
}

/// Printable form of a directory entry name.
pub fn display_name(name: &OsStr) -> String {
    name.to_string_lossy().into_owned()
}

/// Serialize a path as its normalized, lossily decoded string.
///
/// Plain `PathBuf` serialization refuses non-UTF-8 paths.
pub fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&normalize_path(path))
}

pub fn serialize_paths_lossy<S: Serializer>(
    paths: &[PathBuf],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(paths.len()))?;
    for path in paths {
        seq.serialize_element(&normalize_path(path))?;
    }
    seq.end()
}
