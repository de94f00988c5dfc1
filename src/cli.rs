use crate::command::Command;
use clap::Parser;

#[derive(Parser)]
#[command(name = "fs-batch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}
