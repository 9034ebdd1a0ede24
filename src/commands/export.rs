use anyhow::Result;
use chrono::Utc;
use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;

use super::common::open_work_dir;
use super::report::{build_report, ReportArgs};
use crate::export::{funnel_progress_table, visit_history_table, ExportTable};
use crate::fs::interaction_files::list_interactions;
use crate::fs::school_files::load_schools;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// One row per school with its current stage
    Progress,
    /// Every logged visit
    Visits,
}

#[derive(Debug, Serialize)]
struct ExportOutput {
    file_stem: String,
    #[serde(flatten)]
    table: ExportTable,
}

/// Build the export table for `kind`, unfiltered.
pub fn build_table(base: &Path, kind: ExportKind) -> Result<ExportTable> {
    let work_dir = open_work_dir(base)?;
    let table = match kind {
        ExportKind::Progress => {
            let report = build_report(&work_dir, &ReportArgs::default(), Utc::now().date_naive())?;
            funnel_progress_table(&report.schools)
        }
        ExportKind::Visits => {
            let schools = load_schools(&work_dir)?;
            let interactions = list_interactions(&work_dir)?;
            visit_history_table(&interactions, &schools)
        }
    };
    Ok(table)
}

/// Print the table as JSON for spreadsheet tooling.
pub fn execute(base: &Path, kind: ExportKind) -> Result<()> {
    let table = build_table(base, kind)?;
    let name = match kind {
        ExportKind::Progress => "funnel-progress",
        ExportKind::Visits => "visit-history",
    };
    let output = ExportOutput {
        file_stem: ExportTable::file_stem(name, Utc::now().date_naive()),
        table,
    };

    tracing::debug!(rows = output.table.rows.len(), "exporting {name}");
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
