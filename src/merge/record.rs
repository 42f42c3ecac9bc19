//! Loading, overlaying, and saving ordered records

use crate::domain::OrderedRecord;
use crate::error::MergeError;
use crate::render::render_record;
use crate::utils::read_utf8_text;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load a JSON object from `path`, keeping its key order.
pub fn load_record(path: &Path) -> Result<OrderedRecord, MergeError> {
    let content = read_utf8_text(path)
        .map_err(|source| MergeError::Read { path: path.to_path_buf(), source })?;
    parse_record(&content, path)
}

fn parse_record(content: &str, path: &Path) -> Result<OrderedRecord, MergeError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|source| MergeError::MalformedJson { path: path.to_path_buf(), source })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(MergeError::NotAnObject { path: path.to_path_buf(), found: kind_name(&other) }),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Apply `record` onto `acc`.
///
/// Keys already in `acc` take the new value in place; unseen keys are
/// appended. Nested objects are replaced, not merged.
pub fn overlay(acc: &mut OrderedRecord, record: OrderedRecord) {
    for (key, value) in record {
        acc.insert(key, value);
    }
}

/// Render `record` and write it to `path`, replacing any existing file.
pub fn save_record(record: &OrderedRecord, path: &Path, indent: usize) -> Result<(), MergeError> {
    let bytes = render_record(record, indent)
        .map_err(|source| MergeError::Serialize { path: path.to_path_buf(), source })?;
    fs::write(path, bytes).map_err(|source| MergeError::Write { path: path.to_path_buf(), source })
}
