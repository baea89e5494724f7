//! Patch and revert command implementation.

use anyhow::{Context, Result};
use bf2_migrator_core::{Backend, EXECUTABLE_NAME, Error, disable_hub_autopatch, patch_file};
use owo_colors::OwoColorize;
use tracing::{info, warn};

use super::resolve_exe;
use crate::cli::{ExeArgs, PatchOptions};

/// Run the patch command
pub fn run(target: ExeArgs, to: Backend, options: PatchOptions) -> Result<()> {
    let path = resolve_exe(target)?;

    if !options.keep_hub_autopatch && !options.dry_run {
        prepare_for_patch()?;
    }

    let report = match patch_file(&path, to, options.dry_run) {
        Ok(report) => report,
        Err(e) if e.needs_revert() => {
            println!(
                "{} restore the original {} (or revert with the tool that modified it) and try again",
                "Error:".red().bold(),
                EXECUTABLE_NAME
            );
            return Err(e).with_context(|| format!("Failed to patch {}", path.display()));
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to patch {}", path.display())),
    };

    if report.from == report.to {
        println!(
            "{} already uses {}",
            path.display(),
            to.display_name().green().bold()
        );
    } else if report.written {
        println!(
            "Patched {} from {} to {}",
            path.display(),
            report.from.display_name(),
            report.to.display_name().green().bold()
        );
        if to != Backend::Gamespy && to != Backend::Bf2hub {
            println!("Revert the patch before using the BF2Hub Patcher again");
        }
    } else {
        println!(
            "Dry run: {} can be patched from {} to {}",
            path.display(),
            report.from.display_name(),
            report.to.display_name()
        );
    }

    Ok(())
}

/// Run the revert command
pub fn revert(target: ExeArgs, options: PatchOptions) -> Result<()> {
    run(target, Backend::Gamespy, options)
}

/// Keep the BF2Hub client from re-patching the executable after we are done
fn prepare_for_patch() -> Result<()> {
    match disable_hub_autopatch() {
        Ok(true) => info!("BF2Hub client auto-patching disabled"),
        Ok(false) => info!("BF2Hub client not installed"),
        Err(Error::Unsupported(reason)) => warn!("Skipping BF2Hub client check: {}", reason),
        Err(e) => {
            return Err(e).context("Failed to disable BF2Hub client auto-patching");
        }
    }
    Ok(())
}
