//! Editing session for logging or editing an interaction.
//!
//! The draft owns the "current selection" of a form: a stage, a next-step action
//! chosen from that stage's catalog, and the follow-up schedule. Changing the stage
//! drops an action the new stage does not offer, so the caller must re-select.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};

use super::types::{Interaction, NextStep};
use crate::error::FunnelError;
use crate::models::next_step::{options_for, require_valid, validate};
use crate::models::stage::FunnelStage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionDraft {
    school_id: String,
    employee_id: String,
    visit_date: Option<NaiveDate>,
    visit_time: Option<NaiveTime>,
    comments: String,
    stage: FunnelStage,
    action: Option<String>,
    schedule_date: Option<NaiveDate>,
    schedule_time: Option<NaiveTime>,
}

impl InteractionDraft {
    /// Blank draft at the first pipeline stage with no action selected.
    pub fn new(school_id: impl Into<String>, employee_id: impl Into<String>) -> Self {
        Self {
            school_id: school_id.into(),
            employee_id: employee_id.into(),
            visit_date: None,
            visit_time: None,
            comments: String::new(),
            stage: FunnelStage::default(),
            action: None,
            schedule_date: None,
            schedule_time: None,
        }
    }

    /// Seed an edit session from an existing record.
    pub fn from_interaction(interaction: &Interaction) -> Self {
        Self {
            school_id: interaction.school_id.clone(),
            employee_id: interaction.employee_id.clone(),
            visit_date: Some(interaction.date),
            visit_time: Some(interaction.time),
            comments: interaction.comments.clone(),
            stage: interaction.funnel_stage,
            action: Some(interaction.next_step.action.clone()),
            schedule_date: Some(interaction.next_step.schedule_date),
            schedule_time: Some(interaction.next_step.schedule_time),
        }
    }

    pub fn school_id(&self) -> &str {
        &self.school_id
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn stage(&self) -> FunnelStage {
        self.stage
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// Options the form should offer for the currently selected stage.
    pub fn available_actions(&self) -> &'static [&'static str] {
        options_for(self.stage)
    }

    /// Change the stage. Returns `true` when the previously selected action was
    /// cleared because the new stage does not offer it.
    pub fn set_stage(&mut self, stage: FunnelStage) -> bool {
        self.stage = stage;

        let stale = self
            .action
            .as_deref()
            .is_some_and(|action| !validate(stage, action));
        if stale {
            self.action = None;
        }
        stale
    }

    /// Select a next-step action. Membership is checked on commit.
    pub fn select_action(&mut self, action: impl Into<String>) {
        self.action = Some(action.into());
    }

    pub fn clear_action(&mut self) {
        self.action = None;
    }

    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.comments = comments.into();
    }

    /// When the interaction happened. Defaults to the commit time if unset.
    pub fn set_visit(&mut self, date: NaiveDate, time: NaiveTime) {
        self.visit_date = Some(date);
        self.visit_time = Some(truncate_to_minute(time));
    }

    /// When the next step is due.
    pub fn schedule(&mut self, date: NaiveDate, time: NaiveTime) {
        self.schedule_date = Some(date);
        self.schedule_time = Some(truncate_to_minute(time));
    }

    /// Check every required field and the catalog membership of the action.
    pub fn validate(&self) -> Result<(), FunnelError> {
        self.resolve().map(|_| ())
    }

    pub fn is_ready(&self) -> bool {
        self.validate().is_ok()
    }

    /// Build a new record from the draft.
    pub fn commit(&self, id: String, now: DateTime<Utc>) -> Result<Interaction, FunnelError> {
        if self.employee_id.trim().is_empty() {
            return Err(FunnelError::MissingField("employee"));
        }
        let (comments, next_step) = self.resolve()?;

        Ok(Interaction {
            id,
            school_id: self.school_id.clone(),
            employee_id: self.employee_id.clone(),
            date: self.visit_date.unwrap_or_else(|| now.date_naive()),
            time: self.visit_time.unwrap_or_else(|| whole_minute(now)),
            comments,
            funnel_stage: self.stage,
            next_step,
            created_at: now,
            updated_at: None,
        })
    }

    /// Trimmed comments and the validated next step.
    pub(super) fn resolve(&self) -> Result<(String, NextStep), FunnelError> {
        if self.school_id.trim().is_empty() {
            return Err(FunnelError::MissingField("school"));
        }

        let comments = self.comments.trim();
        if comments.is_empty() {
            return Err(FunnelError::MissingField("comments"));
        }

        let action = self
            .action
            .as_deref()
            .ok_or(FunnelError::MissingField("next step action"))?;
        let schedule_date = self
            .schedule_date
            .ok_or(FunnelError::MissingField("next step date"))?;
        let schedule_time = self
            .schedule_time
            .ok_or(FunnelError::MissingField("next step time"))?;

        require_valid(self.stage, action)?;

        Ok((
            comments.to_string(),
            NextStep {
                action: action.to_string(),
                schedule_date,
                schedule_time,
            },
        ))
    }
}

/// Stored times carry no seconds.
fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

fn whole_minute(now: DateTime<Utc>) -> NaiveTime {
    truncate_to_minute(now.time())
}
