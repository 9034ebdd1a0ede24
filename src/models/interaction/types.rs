use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::stage::FunnelStage;

/// Follow-up chosen when logging an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextStep {
    /// Member of `options_for(funnel_stage)` at the time the record was written
    pub action: String,
    pub schedule_date: NaiveDate,
    #[serde(with = "crate::models::clock_time")]
    pub schedule_time: NaiveTime,
}

/// One logged contact with a school (visit, call, meeting).
///
/// History is immutable apart from [`Interaction::apply_edit`], which replaces
/// comments, stage and next step together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub school_id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    #[serde(with = "crate::models::clock_time")]
    pub time: NaiveTime,
    pub comments: String,
    pub funnel_stage: FunnelStage,
    pub next_step: NextStep,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
