//! Plan command implementation.

use anyhow::Result;
use bf2_migrator_core::{Backend, escape_bytes, plan};

/// Run the plan command
pub fn run(from: Backend, to: Backend, json: bool) -> Result<()> {
    let plan = plan(from, to)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!(
        "=== {} -> {} ({} modifications) ===",
        from.display_name(),
        to.display_name(),
        plan.modifications.len()
    );
    for (i, m) in plan.iter().enumerate() {
        println!();
        println!("[{:2}] {} (x{}, {} bytes)", i + 1, m.field, m.count, m.old.len());
        println!("     old: {}", escape_bytes(&m.old));
        println!("     new: {}", escape_bytes(&m.new));
    }

    Ok(())
}
