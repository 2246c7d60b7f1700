use clap::{Parser, Subcommand};

use crate::commands::dump::DumpArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::{dump, generate};

#[derive(Parser)]
#[command(name = "lux-reflect")]
#[command(about = "Static reflection metadata generator", version, author)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse configured target files and write static/dynamic reflection artifacts
    Generate(Box<GenerateArgs>),

    /// Parse configured target files and print the resulting Meta Unit as JSON
    Dump(Box<DumpArgs>),
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate::execute(*args),
        Commands::Dump(args) => dump::execute(*args),
    }
}
