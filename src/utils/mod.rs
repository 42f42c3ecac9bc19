//! Small helpers shared by the scanner, the merger, and the CLI.

pub mod encoding;
pub mod paths;

pub use encoding::read_utf8_text;
pub use paths::{display_name, normalize_path, serialize_path_lossy, serialize_paths_lossy};
