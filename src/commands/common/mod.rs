//! Helpers shared by command implementations: work directory access and
//! terminal formatting.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use std::path::Path;

use crate::fs::WorkDir;
use crate::models::next_step::options_for;
use crate::models::stage::FunnelStage;
use crate::pipeline::summary::Staleness;

/// Open an initialized `.funnel` directory under `base`.
pub fn open_work_dir(base: &Path) -> Result<WorkDir> {
    let work_dir = WorkDir::new(base);
    work_dir.load()?;
    Ok(work_dir)
}

/// Stage label colored after its dashboard color tag.
pub fn stage_badge(stage: FunnelStage) -> ColoredString {
    let label = stage.label();
    match stage {
        FunnelStage::Awareness => label.white(),
        FunnelStage::Interest => label.blue(),
        FunnelStage::Intent => label.yellow(),
        FunnelStage::Consideration => label.green(),
        FunnelStage::DecisionYes => label.bright_green().bold(),
        FunnelStage::DecisionNo => label.red().bold(),
    }
}

pub fn staleness_badge(staleness: Staleness, days: i64) -> ColoredString {
    let text = format!("{days}d");
    match staleness {
        Staleness::Fresh => text.green(),
        Staleness::Aging => text.yellow(),
        Staleness::Stale => text.red(),
    }
}

/// Text progress bar, `width` cells wide.
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Print the catalog for a stage to stderr, used after a rejected next step.
pub fn print_options_hint(stage: FunnelStage) {
    eprintln!("Next steps available at the {} stage:", stage.label().bold());
    for option in options_for(stage) {
        eprintln!("  → {option}");
    }
}

/// Truncate a string for display, using UTF-8 safe character-based truncation.
///
/// Multi-line strings are collapsed to a single line first.
pub fn truncate_for_display(s: &str, max_len: usize) -> String {
    let single_line: String = s.lines().collect::<Vec<_>>().join(" ");

    if single_line.chars().count() <= max_len {
        single_line
    } else {
        let truncated: String = single_line
            .chars()
            .take(max_len.saturating_sub(1))
            .collect();
        format!("{truncated}…")
    }
}
