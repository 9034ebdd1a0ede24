//! Funnel dashboard aggregates: per-school progress rows, filters, stage
//! breakdown and headline statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::current::{days_in_stage, latest_interaction};
use crate::models::interaction::Interaction;
use crate::models::role::Viewer;
use crate::models::school::School;
use crate::models::stage::{list_stages, progress_percentage, FunnelStage};


/// How long a school has sat at its current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Staleness {
    Fresh,
    Aging,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StalenessThresholds {
    /// Up to this many days is `Fresh`
    pub fresh_days: i64,
    /// Up to this many days is `Aging`; beyond is `Stale`
    pub aging_days: i64,
}

impl Default for StalenessThresholds {
    fn default() -> Self {
        Self {
            fresh_days: 7,
            aging_days: 14,
        }
    }
}

impl StalenessThresholds {
    pub fn classify(&self, days: i64) -> Staleness {
        if days <= self.fresh_days {
            Staleness::Fresh
        } else if days <= self.aging_days {
            Staleness::Aging
        } else {
            Staleness::Stale
        }
    }
}

/// One dashboard row: a school and where it sits in the funnel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolProgress {
    pub school_id: String,
    pub school_name: String,
    /// Employee on the latest interaction, else the school's first assignee
    pub employee_id: Option<String>,
    pub assigned_employees: Vec<String>,
    pub current_stage: FunnelStage,
    pub last_activity: Option<NaiveDate>,
    pub total_visits: usize,
    pub days_in_stage: i64,
    pub progress: f64,
    pub staleness: Staleness,
}

/// Build one progress row per school from the full interaction history.
pub fn build_progress(
    schools: &[School],
    interactions: &[Interaction],
    as_of: NaiveDate,
    thresholds: &StalenessThresholds,
) -> Vec<SchoolProgress> {
    schools
        .iter()
        .map(|school| {
            let history: Vec<&Interaction> = interactions
                .iter()
                .filter(|i| i.school_id == school.id)
                .collect();

            let latest = latest_interaction(history.iter().copied());
            let current_stage = latest.map(|i| i.funnel_stage).unwrap_or_default();
            let days = days_in_stage(history.iter().copied(), as_of);

            let employee_id = latest
                .map(|i| i.employee_id.clone())
                .or_else(|| school.primary_employee().map(str::to_string));

            SchoolProgress {
                school_id: school.id.clone(),
                school_name: school.name.clone(),
                employee_id,
                assigned_employees: school.assigned_employees.clone(),
                current_stage,
                last_activity: latest.map(|i| i.date),
                total_visits: history.len(),
                days_in_stage: days,
                progress: progress_percentage(current_stage),
                staleness: thresholds.classify(days),
            }
        })
        .collect()
}

/// Dashboard filters.
///
/// The employee filter is honoured only for viewers that see every school; other
/// viewers are always restricted to their own assignments.
#[derive(Debug, Clone, Default)]
pub struct ProgressFilter {
    pub search: Option<String>,
    pub stage: Option<FunnelStage>,
    pub employee: Option<String>,
    pub viewer: Option<Viewer>,
}

impl ProgressFilter {
    pub fn matches(&self, row: &SchoolProgress) -> bool {
        let sees_all = self
            .viewer
            .as_ref()
            .map_or(true, |viewer| viewer.role.sees_all_schools());

        if let Some(viewer) = &self.viewer {
            if !viewer.can_view(&row.assigned_employees) {
                return false;
            }
        }

        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let needle = search.trim().to_lowercase();
            let in_name = row.school_name.to_lowercase().contains(&needle);
            let in_employee = row
                .employee_id
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&needle));
            if !in_name && !in_employee {
                return false;
            }
        }

        if let Some(stage) = self.stage {
            if row.current_stage != stage {
                return false;
            }
        }

        if let Some(employee) = self.employee.as_deref().filter(|_| sees_all) {
            let assigned = row.assigned_employees.iter().any(|e| e == employee);
            if !assigned && row.employee_id.as_deref() != Some(employee) {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, rows: Vec<SchoolProgress>) -> Vec<SchoolProgress> {
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCount {
    pub stage: FunnelStage,
    pub label: &'static str,
    pub count: usize,
    /// Share of all rows, 0 when there are no rows
    pub percentage: f64,
}

/// Count rows per stage, in pipeline order, including empty stages.
pub fn stage_breakdown(rows: &[SchoolProgress]) -> Vec<StageCount> {
    list_stages()
        .iter()
        .map(|descriptor| {
            let count = rows
                .iter()
                .filter(|row| row.current_stage == descriptor.stage)
                .count();
            StageCount {
                stage: descriptor.stage,
                label: descriptor.label,
                count,
                percentage: percentage(count, rows.len()),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStats {
    pub total: usize,
    /// Schools not yet at a decision
    pub in_progress: usize,
    pub closed_won: usize,
    pub closed_lost: usize,
    /// Closed-won share of all schools
    pub conversion_rate: f64,
}

impl FunnelStats {
    pub fn from_rows(rows: &[SchoolProgress]) -> Self {
        let count = |stage: FunnelStage| rows.iter().filter(|r| r.current_stage == stage).count();
        let closed_won = count(FunnelStage::DecisionYes);

        Self {
            total: rows.len(),
            in_progress: rows
                .iter()
                .filter(|r| !r.current_stage.is_terminal())
                .count(),
            closed_won,
            closed_lost: count(FunnelStage::DecisionNo),
            conversion_rate: percentage(closed_won, rows.len()),
        }
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
