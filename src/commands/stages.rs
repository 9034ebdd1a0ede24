//! Read-only views of the stage registry and next-step catalog.

use anyhow::Result;
use colored::Colorize;

use super::common::{print_options_hint, progress_bar, stage_badge};
use crate::models::next_step::{options_for, require_valid, requires_scheduling};
use crate::models::stage::{list_stages, progress_percentage, FunnelStage};

/// List every stage in pipeline order.
pub fn list() -> Result<()> {
    println!("{}", "Funnel stages".bold());
    println!("{}", "─".repeat(60));

    for descriptor in list_stages() {
        let stage = descriptor.stage;
        println!(
            "{:>2}  {:<16} {} {:>3.0}%  {}",
            stage.index(),
            stage_badge(stage),
            progress_bar(progress_percentage(stage), 12),
            progress_percentage(stage),
            stage.as_str().dimmed()
        );
        println!("    {}", descriptor.description);
    }

    Ok(())
}

/// List the next-step options for a stage.
pub fn options(stage: FunnelStage) -> Result<()> {
    println!("Next steps for {}:", stage_badge(stage));
    for (i, option) in options_for(stage).iter().enumerate() {
        let marker = if requires_scheduling(option) {
            " (schedule)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {}. {option}{marker}", i + 1);
    }

    Ok(())
}

/// Check that an action is allowed at a stage.
pub fn check(stage: FunnelStage, action: &str) -> Result<()> {
    if let Err(e) = require_valid(stage, action) {
        print_options_hint(stage);
        return Err(e.into());
    }

    println!(
        "{} '{action}' is a valid next step at the {} stage",
        "✓".green(),
        stage_badge(stage)
    );
    Ok(())
}
