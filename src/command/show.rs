use crate::action::DEFAULT_VCS_PROGRAM;
use crate::error::Result;
use crate::plan::Plan;

use clap::Parser;
use std::path::PathBuf;

/// Arguments for the `show` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Plan file to print
    pub plan: PathBuf,

    /// Version-control program for entries that do not name one
    #[arg(long, value_name = "PROGRAM", env = "FS_BATCH_VCS", default_value = DEFAULT_VCS_PROGRAM)]
    pub vcs: String,
}

/// Prints the plan re-rendered, with defaults filled in and comments dropped.
pub fn execute(args: ShowArgs) -> Result<()> {
    let plan = Plan::load(&args.plan, &args.vcs)?;
    print!("{}", plan.to_toml());
    Ok(())
}
