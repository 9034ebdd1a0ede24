//! `funnel log`: record a visit with its stage and next step.

use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveTime, Timelike, Utc};
use colored::Colorize;
use std::path::Path;

use super::common::{open_work_dir, print_options_hint, stage_badge};
use crate::error::FunnelError;
use crate::fs::interaction_files::save_interaction;
use crate::fs::school_files::load_schools;
use crate::models::interaction::{Interaction, InteractionDraft};
use crate::models::school::find_school;
use crate::models::stage::FunnelStage;
use crate::validation::{validate_comments, validate_id};

pub struct LogArgs {
    pub school_id: String,
    pub employee_id: String,
    pub stage: FunnelStage,
    pub action: String,
    pub comments: String,
    pub schedule_date: NaiveDate,
    pub schedule_time: NaiveTime,
    pub visit_date: Option<NaiveDate>,
    pub visit_time: Option<NaiveTime>,
}

pub fn execute(base: &Path, args: LogArgs) -> Result<Interaction> {
    let work_dir = open_work_dir(base)?;

    validate_id(&args.employee_id)?;
    validate_comments(&args.comments)?;

    let schools = load_schools(&work_dir)?;
    if find_school(&schools, &args.school_id).is_none() {
        bail!(
            "School '{}' not found. Add it with: funnel school add {} <name>",
            args.school_id,
            args.school_id
        );
    }

    let now = Utc::now();
    let mut draft = InteractionDraft::new(&args.school_id, &args.employee_id);
    draft.set_stage(args.stage);
    draft.select_action(&args.action);
    draft.set_comments(&args.comments);
    draft.schedule(args.schedule_date, args.schedule_time);

    if args.visit_date.is_some() || args.visit_time.is_some() {
        let date = args.visit_date.unwrap_or_else(|| now.date_naive());
        let time = args.visit_time.unwrap_or_else(|| {
            NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or_else(|| now.time())
        });
        draft.set_visit(date, time);
    }

    let interaction = match draft.commit(Interaction::generate_id(), now) {
        Ok(interaction) => interaction,
        Err(e @ FunnelError::InvalidNextStep { .. }) => {
            print_options_hint(args.stage);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    save_interaction(&work_dir, &interaction)?;
    tracing::info!(
        id = %interaction.id,
        school = %interaction.school_id,
        stage = interaction.funnel_stage.as_str(),
        "logged interaction"
    );

    println!(
        "{} Logged {} for {} at the {} stage",
        "✓".green().bold(),
        interaction.id.cyan(),
        interaction.school_id,
        stage_badge(interaction.funnel_stage)
    );
    println!(
        "  Next: {} on {} at {}",
        interaction.next_step.action,
        interaction.next_step.schedule_date,
        interaction.next_step.schedule_time.format("%H:%M")
    );

    Ok(interaction)
}
