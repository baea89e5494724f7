//! Locate command implementation.

use anyhow::{Context, Result};
use bf2_migrator_core::{executable_in, find_install_dir};

/// Run the locate command
pub fn run() -> Result<()> {
    let dir = find_install_dir().context("Failed to determine Battlefield 2 install directory")?;
    let exe = executable_in(&dir);

    println!("Install directory: {}", dir.display());
    println!(
        "Executable:        {}{}",
        exe.display(),
        if exe.exists() { "" } else { " (missing)" }
    );

    Ok(())
}
