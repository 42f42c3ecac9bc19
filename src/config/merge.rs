//! CLI-over-file precedence

use super::loader::JobConfig;
use std::path::PathBuf;

/// Values given on the command line. Empty or `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub indent: Option<usize>,
    pub stop_on_write_error: bool,
}

/// Overlay CLI values onto a loaded job file.
///
/// CLI inputs replace the file's list as a whole rather than extending it.
pub fn merge_cli_with_config(cli: CliOverrides, mut config: JobConfig) -> JobConfig {
    if !cli.inputs.is_empty() {
        config.inputs = cli.inputs;
    }
    if cli.output.is_some() {
        config.output = cli.output;
    }
    if cli.indent.is_some() {
        config.indent = cli.indent;
    }
    if cli.stop_on_write_error {
        config.stop_on_write_error = Some(true);
    }
    config
}
