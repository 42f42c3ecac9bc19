//! Plan command implementation

use anyhow::Result;
use clap::Args;

use super::utils::JobArgs;
use crate::config::CliOverrides;
use crate::domain::MergeJob;
use crate::merge::plan_folders;
use crate::render::render_plan_text;

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub job: JobArgs,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<()> {
    let config = args.job.resolve(CliOverrides::default())?;

    // Planning never writes, so the output folder is optional here.
    let output = config.output.unwrap_or_else(|| ".".into());
    let job = MergeJob::new(config.inputs, output)?;

    let plan = plan_folders(&job)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        println!("{}", render_plan_text(&plan));
    }
    Ok(())
}
