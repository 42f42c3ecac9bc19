//! Error kinds raised while loading, merging, and writing records.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Error in file {}:\n{source}", .path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("File {} does not hold a JSON object (found {found})", .path.display())]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("Error while reading {}:\n{source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error while saving {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error while serializing {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Indent of {indent} is too wide (at most {max} spaces)")]
    InvalidIndent { indent: usize, max: usize },

    #[error("Please select the folders and the output folder.")]
    MissingInput,
}
