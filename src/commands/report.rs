//! `funnel report`: dashboard view of every school's position in the funnel.

use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use super::common::{
    open_work_dir, progress_bar, stage_badge, staleness_badge, truncate_for_display,
};
use crate::fs::interaction_files::list_interactions;
use crate::fs::school_files::load_schools;
use crate::fs::WorkDir;
use crate::models::role::{Role, Viewer};
use crate::models::stage::FunnelStage;
use crate::pipeline::summary::{
    build_progress, stage_breakdown, FunnelStats, ProgressFilter, SchoolProgress, StageCount,
};

#[derive(Debug, Default)]
pub struct ReportArgs {
    pub search: Option<String>,
    pub stage: Option<FunnelStage>,
    pub employee: Option<String>,
    pub role: Option<Role>,
    pub viewer: Option<String>,
    pub json: bool,
}

impl ReportArgs {
    /// Resolve the viewing identity. Roles other than super admin need an employee ID.
    fn viewer(&self) -> Result<Option<Viewer>> {
        let Some(role) = self.role else {
            return Ok(None);
        };
        match (&self.viewer, role.sees_all_schools()) {
            (Some(id), _) => Ok(Some(Viewer::new(role, id.as_str()))),
            (None, true) => Ok(Some(Viewer::new(role, ""))),
            (None, false) => bail!("--viewer <employee-id> is required with --role {role}"),
        }
    }

    fn filter(&self) -> Result<ProgressFilter> {
        Ok(ProgressFilter {
            search: self.search.clone(),
            stage: self.stage,
            employee: self.employee.clone(),
            viewer: self.viewer()?,
        })
    }
}

/// Filtered dashboard rows with the breakdown and stats computed over them.
#[derive(Debug, Clone, Serialize)]
pub struct FunnelReport {
    pub as_of: NaiveDate,
    pub stats: FunnelStats,
    pub breakdown: Vec<StageCount>,
    pub schools: Vec<SchoolProgress>,
}

pub fn build_report(work_dir: &WorkDir, args: &ReportArgs, as_of: NaiveDate) -> Result<FunnelReport> {
    let config = work_dir.config()?;
    let schools = load_schools(work_dir)?;
    let interactions = list_interactions(work_dir)?;

    let rows = build_progress(&schools, &interactions, as_of, &config.report.thresholds());
    let rows = args.filter()?.apply(rows);

    Ok(FunnelReport {
        as_of,
        stats: FunnelStats::from_rows(&rows),
        breakdown: stage_breakdown(&rows),
        schools: rows,
    })
}

pub fn execute(base: &Path, args: ReportArgs) -> Result<()> {
    let work_dir = open_work_dir(base)?;
    let report = build_report(&work_dir, &args, Utc::now().date_naive())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &FunnelReport) {
    let stats = &report.stats;

    println!("{} (as of {})", "Funnel report".bold(), report.as_of);
    println!("{}", "─".repeat(60));
    println!(
        "Schools: {}  In progress: {}  Won: {}  Lost: {}  Conversion: {:.1}%",
        stats.total.to_string().bold(),
        stats.in_progress,
        stats.closed_won.to_string().green(),
        stats.closed_lost.to_string().red(),
        stats.conversion_rate
    );
    println!();

    for entry in &report.breakdown {
        println!(
            "{:<16} {} {:>3} ({:.0}%)",
            stage_badge(entry.stage),
            progress_bar(entry.percentage, 20),
            entry.count,
            entry.percentage
        );
    }

    if report.schools.is_empty() {
        println!();
        println!("{}", "No schools match the current filters.".dimmed());
        return;
    }

    println!();
    println!(
        "{:<28} {:<14} {:<16} {:>6} {:>6}  {}",
        "School".bold(),
        "Employee".bold(),
        "Stage".bold(),
        "Visits".bold(),
        "Days".bold(),
        "Last activity".bold()
    );
    for row in &report.schools {
        let last = row
            .last_activity
            .map(|d| d.to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "{:<28} {:<14} {:<16} {:>6} {:>6}  {}",
            truncate_for_display(&row.school_name, 28),
            row.employee_id.as_deref().unwrap_or("-"),
            stage_badge(row.current_stage),
            row.total_visits,
            staleness_badge(row.staleness, row.days_in_stage),
            last.dimmed()
        );
    }
}
