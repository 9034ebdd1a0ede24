//! Current-stage derivation.
//!
//! The most recent interaction wins, ordered by `created_at`. Records created at the
//! same instant are ordered by ID, so the lexicographically greatest ID is "latest".
//! An empty history is treated as `Awareness`.

use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::interaction::Interaction;
use crate::models::stage::FunnelStage;

fn recency(a: &Interaction, b: &Interaction) -> Ordering {
    a.created_at
        .cmp(&b.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

pub fn latest_interaction<'a, I>(records: I) -> Option<&'a Interaction>
where
    I: IntoIterator<Item = &'a Interaction>,
{
    records.into_iter().max_by(|a, b| recency(a, b))
}

pub fn current_stage<'a, I>(records: I) -> FunnelStage
where
    I: IntoIterator<Item = &'a Interaction>,
{
    latest_interaction(records)
        .map(|interaction| interaction.funnel_stage)
        .unwrap_or_default()
}

/// Current stage for every school that appears in `records`.
pub fn current_stages(records: &[Interaction]) -> BTreeMap<String, FunnelStage> {
    let mut latest: BTreeMap<&str, &Interaction> = BTreeMap::new();

    for record in records {
        latest
            .entry(record.school_id.as_str())
            .and_modify(|current| {
                if recency(record, *current) == Ordering::Greater {
                    *current = record;
                }
            })
            .or_insert(record);
    }

    latest
        .into_iter()
        .map(|(school_id, record)| (school_id.to_string(), record.funnel_stage))
        .collect()
}

/// One school's interactions, newest first.
pub fn history_for<'a>(records: &'a [Interaction], school_id: &str) -> Vec<&'a Interaction> {
    let mut history: Vec<&Interaction> = records
        .iter()
        .filter(|r| r.school_id == school_id)
        .collect();
    history.sort_by(|a, b| recency(b, a));
    history
}

/// Whole days the school has spent at its current stage as of `as_of`.
///
/// Counted from the earliest record of the trailing run of records at the current
/// stage. Zero for an empty history or a run that starts after `as_of`.
pub fn days_in_stage<'a, I>(records: I, as_of: NaiveDate) -> i64
where
    I: IntoIterator<Item = &'a Interaction>,
{
    let mut ordered: Vec<&Interaction> = records.into_iter().collect();
    ordered.sort_by(|a, b| recency(a, b));

    let Some(latest) = ordered.last() else {
        return 0;
    };

    let entered: DateTime<Utc> = ordered
        .iter()
        .rev()
        .take_while(|r| r.funnel_stage == latest.funnel_stage)
        .last()
        .map(|r| r.created_at)
        .unwrap_or(latest.created_at);

    (as_of - entered.date_naive()).num_days().max(0)
}
