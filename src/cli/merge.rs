//! Merge command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use super::guided::{prompt_input_folders, prompt_output_folder};
use super::utils::JobArgs;
use crate::config::CliOverrides;
use crate::merge::merge_folders;
use crate::render::{render_issues_text, render_report_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub job: JobArgs,

    /// Spaces per indentation level in written files [default: 4]
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Stop at the first file that cannot be written
    #[arg(long)]
    pub stop_on_write_error: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pick the input folders (and the output folder, if not given) interactively
    #[arg(short = 'I', long)]
    pub interactive: bool,
}

pub fn run(args: MergeArgs) -> Result<()> {
    let extra = CliOverrides {
        indent: args.indent,
        stop_on_write_error: args.stop_on_write_error,
        ..CliOverrides::default()
    };
    let mut config = args.job.resolve(extra)?;

    if args.interactive {
        config.inputs = prompt_input_folders()?;
        if config.output.is_none() {
            config.output = prompt_output_folder()?;
        }
    }

    let job = config.into_job()?;
    tracing::debug!(
        "Merging {} folder(s) into {}",
        job.inputs().len(),
        job.output().display()
    );

    let report = merge_folders(&job);

    match args.format {
        OutputFormat::Text => println!("{}", render_report_text(&report)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize merge report")?
        ),
    }
    if report.has_issues() {
        eprintln!("{}", render_issues_text(&report));
    }

    Ok(())
}
