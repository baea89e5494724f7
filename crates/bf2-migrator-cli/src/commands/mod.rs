//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod detect;
pub mod locate;
pub mod patch;
pub mod plan;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::ExeArgs;

/// Resolve the executable from `--exe`/`BF2_EXE`, falling back to the registry
pub fn resolve_exe(args: ExeArgs) -> Result<PathBuf> {
    if let Some(path) = args.exe {
        debug!("Using executable from arguments: {}", path.display());
        return Ok(path);
    }

    bf2_migrator_core::find_executable()
        .context("Failed to determine Battlefield 2 install directory, pass --exe instead")
}
