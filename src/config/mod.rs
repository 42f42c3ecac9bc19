//! Job file loading and merging
//!
//! Handles loading from job files and CLI arguments with proper precedence
//! (CLI > File > Defaults).

pub mod loader;
pub mod merge;

pub use loader::{load_config, JobConfig};
pub use merge::{merge_cli_with_config, CliOverrides};
