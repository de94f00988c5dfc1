use super::prompt::confirm_plan;
use super::summary::print_summary;
use crate::action::DEFAULT_VCS_PROGRAM;
use crate::error::{BatchError, Result};
use crate::plan::Plan;

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

/// Arguments for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyArgs {
    /// Plan file listing the actions to run
    pub plan: PathBuf,

    /// Validate and preview without changing anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Skip the interactive confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Version-control program for entries that do not name one
    #[arg(long, value_name = "PROGRAM", env = "FS_BATCH_VCS", default_value = DEFAULT_VCS_PROGRAM)]
    pub vcs: String,
}

pub fn execute(args: ApplyArgs) -> Result<()> {
    let plan = Plan::load(&args.plan, &args.vcs)?;
    log::debug!(
        "Loaded {} actions from {}",
        plan.len(),
        args.plan.display()
    );

    if plan.is_empty() {
        println!("{}", "No actions in plan".yellow());
        return Ok(());
    }

    let batch = plan.clone().into_batch();

    // Validation gates everything, including dry runs
    if let Err(e) = batch.validate() {
        eprintln!("{} {}", "Validation failed:".red().bold(), e);
        return Err(e);
    }

    if args.dry_run {
        for line in batch.preview() {
            println!("{}", line.dimmed());
        }
        print_summary(&plan, true);
        return Ok(());
    }

    if !confirm_plan(&args, &plan)? {
        println!("\n{}", "Operation cancelled.".yellow());
        return Err(BatchError::Cancelled);
    }

    if let Err(e) = batch.commit(|line| println!("{}", line.cyan())) {
        eprintln!("{} {}", "Error during commit:".red().bold(), e);
        eprintln!(
            "{}",
            "Actions before the failing one were applied and are not rolled back.".yellow()
        );
        return Err(e);
    }

    print_summary(&plan, false);
    Ok(())
}
