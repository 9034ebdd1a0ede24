//! Labelled tables handed to export encoders (CSV, spreadsheet, PDF).
//!
//! Cells are display strings. Stage cells carry the stage label, never the raw
//! enum value, so encoders need no knowledge of the funnel.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::clock_time;
use crate::models::interaction::Interaction;
use crate::models::school::{find_school, School};
use crate::pipeline::current::history_for;
use crate::pipeline::summary::SchoolProgress;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportColumn {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
}

impl ExportColumn {
    pub const fn new(key: &'static str, label: &'static str, width: u16) -> Self {
        Self {
            key,
            label,
            width: Some(width),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    pub title: String,
    pub columns: Vec<ExportColumn>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn new(title: impl Into<String>, columns: Vec<ExportColumn>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width must match columns");
        self.rows.push(row);
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.label).collect()
    }

    /// Cell value by column key.
    pub fn cell(&self, row: usize, key: &str) -> Option<&str> {
        let column = self.columns.iter().position(|c| c.key == key)?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Dated file name without extension, e.g. `funnel-progress-2024-01-15`.
    pub fn file_stem(name: &str, date: NaiveDate) -> String {
        format!("{name}-{}", date.format("%Y-%m-%d"))
    }
}

const PROGRESS_COLUMNS: [ExportColumn; 6] = [
    ExportColumn::new("schoolName", "School Name", 30),
    ExportColumn::new("employeeName", "Employee", 25),
    ExportColumn::new("currentStage", "Current Stage", 25),
    ExportColumn::new("lastActivity", "Last Activity", 20),
    ExportColumn::new("totalVisits", "Total Visits", 15),
    ExportColumn::new("daysInStage", "Days in Stage", 15),
];

const VISIT_COLUMNS: [ExportColumn; 8] = [
    ExportColumn::new("date", "Date", 15),
    ExportColumn::new("time", "Time", 10),
    ExportColumn::new("schoolName", "School", 30),
    ExportColumn::new("employeeName", "Employee", 20),
    ExportColumn::new("funnelStage", "Stage", 20),
    ExportColumn::new("nextStep", "Next Step", 35),
    ExportColumn::new("scheduledFor", "Scheduled For", 20),
    ExportColumn::new("comments", "Comments", 40),
];

pub fn funnel_progress_table(rows: &[SchoolProgress]) -> ExportTable {
    let mut table = ExportTable::new("Funnel Progress Report", PROGRESS_COLUMNS.to_vec());

    for row in rows {
        table.push_row(vec![
            row.school_name.clone(),
            row.employee_id.clone().unwrap_or_default(),
            row.current_stage.label().to_string(),
            row.last_activity
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            row.total_visits.to_string(),
            row.days_in_stage.to_string(),
        ]);
    }

    table
}

/// Visit log, newest first within each school, schools in the order given.
///
/// Visits for schools missing from `schools` are listed last under their raw ID.
pub fn visit_history_table(interactions: &[Interaction], schools: &[School]) -> ExportTable {
    let mut table = ExportTable::new("Visit History", VISIT_COLUMNS.to_vec());

    let mut school_ids: Vec<&str> = schools.iter().map(|s| s.id.as_str()).collect();
    for interaction in interactions {
        if !school_ids.contains(&interaction.school_id.as_str()) {
            school_ids.push(interaction.school_id.as_str());
        }
    }

    for school_id in school_ids {
        let school_name = find_school(schools, school_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| school_id.to_string());

        for visit in history_for(interactions, school_id) {
            table.push_row(vec![
                visit.date.format("%Y-%m-%d").to_string(),
                clock_time::format(&visit.time),
                school_name.clone(),
                visit.employee_id.clone(),
                visit.funnel_stage.label().to_string(),
                visit.next_step.action.clone(),
                format!(
                    "{} {}",
                    visit.next_step.schedule_date.format("%Y-%m-%d"),
                    clock_time::format(&visit.next_step.schedule_time)
                ),
                visit.comments.clone(),
            ]);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interaction::InteractionDraft;
    use crate::models::stage::FunnelStage;
    use crate::pipeline::summary::{build_progress, StalenessThresholds};
    use chrono::{NaiveTime, TimeZone, Utc};

    fn logged(id: &str, school_id: &str, stage: FunnelStage, action: &str, day: u32) -> Interaction {
        let mut draft = InteractionDraft::new(school_id, "mike");
        draft.set_comments("Follow-up visit");
        draft.set_stage(stage);
        draft.select_action(action);
        draft.schedule(
            NaiveDate::from_ymd_opt(2024, 1, day + 3).unwrap(),
            NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
        );
        draft
            .commit(
                id.to_string(),
                Utc.with_ymd_and_hms(2024, 1, day, 11, 0, 0).unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_progress_table_uses_stage_labels() {
        let mut school = School::new("school-3", "Sunset Elementary");
        school.assign("mike");
        let interactions = vec![logged(
            "v1",
            "school-3",
            FunnelStage::DecisionYes,
            "Send contract for signature",
            10,
        )];
        let rows = build_progress(
            &[school],
            &interactions,
            NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            &StalenessThresholds::default(),
        );

        let table = funnel_progress_table(&rows);
        assert_eq!(
            table.headers(),
            vec![
                "School Name",
                "Employee",
                "Current Stage",
                "Last Activity",
                "Total Visits",
                "Days in Stage"
            ]
        );
        assert_eq!(table.cell(0, "currentStage"), Some("Decision - Yes"));
        assert_eq!(table.cell(0, "lastActivity"), Some("2024-01-10"));
        assert_eq!(table.cell(0, "daysInStage"), Some("2"));
        assert_eq!(table.cell(1, "currentStage"), None);
    }

    #[test]
    fn test_visit_table_orders_newest_first_and_keeps_unknown_schools() {
        let schools = vec![School::new("school-1", "Greenfield High School")];
        let interactions = vec![
            logged("v1", "school-1", FunnelStage::Awareness, "Send introductory email", 3),
            logged("v2", "school-1", FunnelStage::Intent, "Gather requirements", 9),
            logged("v3", "school-9", FunnelStage::Interest, "Follow up in X days", 5),
        ];

        let table = visit_history_table(&interactions, &schools);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.cell(0, "funnelStage"), Some("Intent"));
        assert_eq!(table.cell(0, "scheduledFor"), Some("2024-01-12 15:00"));
        assert_eq!(table.cell(1, "funnelStage"), Some("Awareness"));
        assert_eq!(table.cell(2, "schoolName"), Some("school-9"));
    }

    #[test]
    fn test_file_stem() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(
            ExportTable::file_stem("funnel-progress", date),
            "funnel-progress-2024-01-15"
        );
    }
}
