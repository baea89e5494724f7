use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("bf2_migrator={level}").parse()?)
                .add_directive(format!("bf2_migrator_core={level}").parse()?),
        )
        .with_target(false)
        .init();

    match cli.command {
        Command::Detect { target, json } => commands::detect::run(target, json),
        Command::Plan { from, to, json } => commands::plan::run(from, to, json),
        Command::Patch {
            target,
            to,
            options,
        } => commands::patch::run(target, to, options),
        Command::Revert { target, options } => commands::patch::revert(target, options),
        Command::Locate => commands::locate::run(),
    }
}
