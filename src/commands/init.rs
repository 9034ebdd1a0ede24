use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::fs::WorkDir;

/// Create the `.funnel/` directory under `base`.
pub fn execute(base: &Path) -> Result<()> {
    let work_dir = WorkDir::new(base);
    work_dir.initialize()?;

    tracing::info!(path = %work_dir.root().display(), "initialized work directory");
    println!(
        "{} Initialized {}",
        "✓".green().bold(),
        work_dir.root().display()
    );
    println!("  Add schools with: funnel school add <id> <name> --employee <id>");

    Ok(())
}
