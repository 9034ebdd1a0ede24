use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use super::common::{open_work_dir, stage_badge, truncate_for_display};
use crate::fs::interaction_files::list_interactions;
use crate::fs::school_files::load_schools;
use crate::models::school::find_school;
use crate::pipeline::current::{current_stage, history_for};

/// Show a school's visits, newest first, with its derived current stage.
pub fn execute(base: &Path, school_id: &str) -> Result<()> {
    let work_dir = open_work_dir(base)?;
    let schools = load_schools(&work_dir)?;
    let Some(school) = find_school(&schools, school_id) else {
        bail!("School '{school_id}' not found");
    };

    let interactions = list_interactions(&work_dir)?;
    let history = history_for(&interactions, school_id);
    let stage = current_stage(history.iter().copied());

    println!("{} ({})", school.name.bold(), school.id.cyan());
    println!("Current stage: {}", stage_badge(stage));
    println!("{}", "─".repeat(60));

    if history.is_empty() {
        println!("{}", "No visits logged yet.".dimmed());
        return Ok(());
    }

    for record in history {
        println!(
            "{} {}  {:<16} {}",
            record.date,
            record.time.format("%H:%M"),
            stage_badge(record.funnel_stage),
            record.employee_id.dimmed()
        );
        println!("    {}", truncate_for_display(&record.comments, 72));
        println!(
            "    → {} ({} {})",
            record.next_step.action,
            record.next_step.schedule_date,
            record.next_step.schedule_time.format("%H:%M")
        );
        println!("    {}", record.id.dimmed());
    }

    Ok(())
}
