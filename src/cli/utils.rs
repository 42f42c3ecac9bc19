//! Arguments shared by the subcommands.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::{load_config, merge_cli_with_config, CliOverrides, JobConfig};

#[derive(Args)]
pub struct JobArgs {
    /// Input folders, in overlay order (later folders win)
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Output folder (created if missing)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Job file (json-merge.toml or json-merge.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl JobArgs {
    /// Load the job file, if any, and lay the command-line values over it.
    pub fn resolve(&self, extra: CliOverrides) -> Result<JobConfig> {
        let cwd = std::env::current_dir()?;
        let config = load_config(&cwd, self.config.as_deref())?;
        let cli = CliOverrides { inputs: self.inputs.clone(), output: self.output.clone(), ..extra };
        Ok(merge_cli_with_config(cli, config))
    }
}
