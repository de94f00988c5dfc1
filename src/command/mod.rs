pub mod apply;
pub mod show;

mod prompt;
mod summary;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Command {
    /// Validate a plan file and commit its actions in order.
    Apply(apply::ApplyArgs),
    /// Print a plan file in normalized form.
    Show(show::ShowArgs),
}
