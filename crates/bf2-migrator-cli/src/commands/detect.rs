//! Detect command implementation.

use anyhow::{Context, Result};
use bf2_migrator_core::{EXECUTABLE_NAME, detect_file};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::resolve_exe;
use crate::cli::ExeArgs;

#[derive(Serialize)]
struct DetectOutput {
    path: String,
    backend: bf2_migrator_core::Backend,
}

/// Run the detect command
pub fn run(target: ExeArgs, json: bool) -> Result<()> {
    let path = resolve_exe(target)?;
    let backend = match detect_file(&path) {
        Ok(backend) => backend,
        Err(e) if e.needs_revert() => {
            println!(
                "{} restore the original {} (or revert with the tool that modified it) and try again",
                "Error:".red().bold(),
                EXECUTABLE_NAME
            );
            return Err(e).with_context(|| format!("Failed to detect {}", path.display()));
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    if json {
        let output = DetectOutput {
            path: path.display().to_string(),
            backend,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Executable: {}", path.display());
    println!("Backend:    {}", backend.display_name().green().bold());

    Ok(())
}
