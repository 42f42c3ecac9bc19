//! Core data types shared across the crate.

use crate::error::MergeError;
use crate::utils::{serialize_path_lossy, serialize_paths_lossy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// String-keyed JSON object whose iteration order is insertion order.
///
/// Backed by `serde_json::Map` with the `preserve_order` feature, so
/// re-inserting an existing key updates the value without moving the key.
pub type OrderedRecord = Map<String, Value>;

pub const DEFAULT_INDENT: usize = 4;
pub const MAX_INDENT: usize = 16;

/// Knobs that change how a job writes its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSettings {
    /// Spaces per indentation level in written files.
    pub indent: usize,
    /// Abort the remaining files after the first write failure.
    pub stop_on_write_error: bool,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self { indent: DEFAULT_INDENT, stop_on_write_error: false }
    }
}

/// A single merge request: ordered input folders and one output folder.
///
/// Construction guarantees at least one input and a non-empty output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeJob {
    inputs: Vec<PathBuf>,
    output: PathBuf,
    settings: MergeSettings,
}

impl MergeJob {
    pub fn new(inputs: Vec<PathBuf>, output: PathBuf) -> Result<Self, MergeError> {
        if inputs.is_empty() || output.as_os_str().is_empty() {
            return Err(MergeError::MissingInput);
        }
        Ok(Self { inputs, output, settings: MergeSettings::default() })
    }

    pub fn with_settings(mut self, settings: MergeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Input folders in overlay order.
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// The folder whose listing decides which files get produced.
    pub fn primary_input(&self) -> &Path {
        &self.inputs[0]
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn settings(&self) -> &MergeSettings {
        &self.settings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MalformedJson,
    NotAnObject,
    Read,
    Write,
}

/// A recovered failure, kept for the end-of-job summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeIssue {
    pub kind: IssueKind,
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    pub detail: String,
}

impl MergeIssue {
    pub fn from_error(err: &MergeError) -> Option<Self> {
        let (kind, path, detail) = match err {
            MergeError::MalformedJson { path, source } => {
                (IssueKind::MalformedJson, path, source.to_string())
            }
            MergeError::NotAnObject { path, found } => {
                (IssueKind::NotAnObject, path, format!("expected an object, found {found}"))
            }
            MergeError::Read { path, source } => (IssueKind::Read, path, source.to_string()),
            MergeError::Write { path, source } => (IssueKind::Write, path, source.to_string()),
            MergeError::Serialize { path, source } => {
                (IssueKind::Write, path, source.to_string())
            }
            MergeError::MissingInput | MergeError::InvalidIndent { .. } => return None,
        };
        Some(Self { kind, path: path.clone(), detail })
    }
}

/// Outcome of a finished job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    #[serde(serialize_with = "serialize_path_lossy")]
    pub output: PathBuf,
    pub files_written: usize,
    pub issues: Vec<MergeIssue>,
    /// Set when `stop_on_write_error` cut the job short.
    pub stopped_early: bool,
}

impl MergeReport {
    pub fn new(output: &Path) -> Self {
        Self { output: output.to_path_buf(), ..Self::default() }
    }

    pub fn record(&mut self, err: &MergeError) {
        if let Some(issue) = MergeIssue::from_error(err) {
            self.issues.push(issue);
        }
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// One file of the File Set and the folders that carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub name: String,
    #[serde(serialize_with = "serialize_paths_lossy")]
    pub sources: Vec<PathBuf>,
}

/// Dry-run view of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergePlan {
    pub files: Vec<PlannedFile>,
    /// Names found in later folders only; these never reach the output.
    pub ignored: Vec<String>,
}
