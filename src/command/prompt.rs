//! Confirmation prompt shown before committing a plan.
//!
//! Skipped with `--yes`. On a non-interactive stdin the prompt is not shown
//! and the plan is only committed when `--yes` was given.

use super::apply::ApplyArgs;
use crate::action::Action;
use crate::error::Result;
use crate::plan::Plan;

use colored::Colorize;
use std::io::{self, IsTerminal, Write};

const PREVIEW_LIMIT: usize = 10;

/// Prompts the user for confirmation before committing.
///
/// # Returns
///
/// - `Ok(true)` if the user confirms or `--yes` is set
/// - `Ok(false)` if the user declines or stdin is not a terminal
///
/// # Errors
///
/// Returns `Err` only on I/O errors reading stdin.
pub(crate) fn confirm_plan(args: &ApplyArgs, plan: &Plan) -> Result<bool> {
    if args.yes {
        return Ok(true);
    }

    if !io::stdin().is_terminal() {
        log::warn!("Non-interactive terminal detected. Use --yes to confirm automatically.");
        return Ok(false);
    }

    println!("\n{}", "Plan:".bold().cyan());
    println!(
        "  {} {}",
        "File:".bold(),
        args.plan.display().to_string().yellow()
    );

    for action in plan.actions().iter().take(PREVIEW_LIMIT) {
        println!("  {} {}", "•".green(), action.describe());
    }
    if plan.len() > PREVIEW_LIMIT {
        println!("  • ... and {} more", plan.len() - PREVIEW_LIMIT);
    }

    let vcs_steps = plan.actions().iter().filter(|a| a.is_vcs()).count();
    if vcs_steps > 0 {
        println!(
            "  {} {} version-control step{} will run",
            "!".yellow(),
            vcs_steps,
            if vcs_steps == 1 { "" } else { "s" }
        );
    }

    println!();

    print!("{} {} ", "Continue?".bold(), "(y/N)".dimmed());
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;

    let confirmed =
        response.trim().eq_ignore_ascii_case("y") || response.trim().eq_ignore_ascii_case("yes");

    if !confirmed {
        log::info!("Plan cancelled by user");
    }

    Ok(confirmed)
}
