//! Command-line definitions.

use std::path::PathBuf;

use bf2_migrator_core::Backend;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bf2-migrator")]
#[command(about = "Switch Battlefield 2 between online-service backends")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show which backend the executable currently uses
    Detect {
        #[command(flatten)]
        target: ExeArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the modifications needed to move between two backends
    Plan {
        /// Backend the executable currently uses
        #[arg(long)]
        from: Backend,

        /// Backend to switch to
        #[arg(long)]
        to: Backend,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Patch the executable to use another backend
    Patch {
        #[command(flatten)]
        target: ExeArgs,

        /// Backend to switch to
        #[arg(long, default_value = "openspy")]
        to: Backend,

        #[command(flatten)]
        options: PatchOptions,
    },
    /// Revert the executable to use GameSpy
    Revert {
        #[command(flatten)]
        target: ExeArgs,

        #[command(flatten)]
        options: PatchOptions,
    },
    /// Show where the game is installed
    Locate,
}

#[derive(Args)]
pub struct ExeArgs {
    /// Path to BF2.exe (looked up in the registry if omitted)
    #[arg(long, env = "BF2_EXE")]
    pub exe: Option<PathBuf>,
}

#[derive(Args)]
pub struct PatchOptions {
    /// Verify the patch without writing the executable
    #[arg(long)]
    pub dry_run: bool,

    /// Leave the BF2Hub client's auto-patch settings alone
    #[arg(long)]
    pub keep_hub_autopatch: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_patch_defaults_to_openspy() {
        let cli = Cli::try_parse_from(["bf2-migrator", "patch", "--exe", "BF2.exe"]).unwrap();
        match cli.command {
            Command::Patch {
                target,
                to,
                options,
            } => {
                assert_eq!(target.exe, Some(PathBuf::from("BF2.exe")));
                assert_eq!(to, Backend::Openspy);
                assert!(!options.dry_run);
                assert!(!options.keep_hub_autopatch);
            }
            _ => panic!("expected patch command"),
        }
    }

    #[test]
    fn test_plan_parses_backends() {
        let cli =
            Cli::try_parse_from(["bf2-migrator", "plan", "--from", "bf2hub", "--to", "PlayBF2"])
                .unwrap();
        match cli.command {
            Command::Plan { from, to, json } => {
                assert_eq!(from, Backend::Bf2hub);
                assert_eq!(to, Backend::Playbf2);
                assert!(!json);
            }
            _ => panic!("expected plan command"),
        }
    }

    #[test]
    fn test_invalid_backend_is_rejected() {
        assert!(Cli::try_parse_from(["bf2-migrator", "patch", "--to", "example"]).is_err());
    }
}
