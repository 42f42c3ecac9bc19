//! Strict UTF-8 file reading.
//!
//! Source files must be UTF-8. A leading byte-order mark is dropped because
//! JSON parsers reject it while editors on some platforms still write it.

use std::io;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// Read a whole file as UTF-8, dropping a leading BOM.
///
/// Invalid UTF-8 surfaces as an `io::ErrorKind::InvalidData` error.
pub fn read_utf8_text(path: &Path) -> io::Result<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(match content.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => content,
    })
}
