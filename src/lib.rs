#![doc = include_str!("../README.md")]

pub mod action;
pub mod batch;
pub mod cli;
pub mod command;
pub mod error;
pub mod plan;

pub use action::{Action, FsAction};
pub use batch::{ActionBatch, stdout_logger};
pub use error::*;
pub use plan::Plan;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() -> Result<()> {
    use clap::Parser;
    use command::Command;

    let cli = cli::Cli::parse();
    match cli.command {
        Command::Apply(args) => command::apply::execute(args),
        Command::Show(args) => command::show::execute(args),
    }
}
