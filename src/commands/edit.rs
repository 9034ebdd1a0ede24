//! `funnel edit`: revise the comments, stage or next step of a logged visit.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, Utc};
use colored::Colorize;
use std::path::Path;

use super::common::{open_work_dir, print_options_hint, stage_badge};
use crate::error::FunnelError;
use crate::fs::interaction_files::{load_interaction, save_interaction};
use crate::models::interaction::{Interaction, InteractionDraft};
use crate::models::stage::FunnelStage;
use crate::validation::validate_comments;

#[derive(Debug, Default)]
pub struct EditArgs {
    pub stage: Option<FunnelStage>,
    pub action: Option<String>,
    pub comments: Option<String>,
    pub schedule_date: Option<NaiveDate>,
    pub schedule_time: Option<NaiveTime>,
}

pub fn execute(base: &Path, id: &str, args: EditArgs) -> Result<Interaction> {
    let work_dir = open_work_dir(base)?;
    let mut interaction = load_interaction(&work_dir, id)
        .with_context(|| format!("Interaction '{id}' not found"))?;

    let mut draft = InteractionDraft::from_interaction(&interaction);

    if let Some(stage) = args.stage {
        let previous = interaction.next_step.action.clone();
        if draft.set_stage(stage) && args.action.is_none() {
            eprintln!(
                "{} '{}' is not available at the {} stage; pass --action to choose a new next step",
                "!".yellow().bold(),
                previous,
                stage.label()
            );
        }
    }
    if let Some(action) = &args.action {
        draft.select_action(action);
    }
    if let Some(comments) = &args.comments {
        validate_comments(comments)?;
        draft.set_comments(comments);
    }
    if args.schedule_date.is_some() || args.schedule_time.is_some() {
        draft.schedule(
            args.schedule_date
                .unwrap_or(interaction.next_step.schedule_date),
            args.schedule_time
                .unwrap_or(interaction.next_step.schedule_time),
        );
    }

    if let Err(e) = interaction.apply_edit(&draft, Utc::now()) {
        if matches!(
            e,
            FunnelError::InvalidNextStep { .. } | FunnelError::MissingField("next step action")
        ) {
            print_options_hint(draft.stage());
        }
        return Err(e.into());
    }

    save_interaction(&work_dir, &interaction)?;
    tracing::info!(id = %interaction.id, stage = interaction.funnel_stage.as_str(), "edited interaction");

    println!(
        "{} Updated {} ({})",
        "✓".green().bold(),
        interaction.id.cyan(),
        stage_badge(interaction.funnel_stage)
    );

    Ok(interaction)
}
