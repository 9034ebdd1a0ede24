//! Interaction records stored as `.funnel/interactions/{id}.md`.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::work_dir::WorkDir;
use crate::models::interaction::Interaction;
use crate::models::MarkdownSerializable;
use crate::validation::validate_id;

pub fn interaction_path(work_dir: &WorkDir, id: &str) -> Result<PathBuf> {
    validate_id(id).context("Invalid interaction ID")?;
    Ok(work_dir.interactions_dir().join(format!("{id}.md")))
}

pub fn save_interaction(work_dir: &WorkDir, interaction: &Interaction) -> Result<()> {
    let path = interaction_path(work_dir, &interaction.id)?;
    interaction
        .save(&path)
        .with_context(|| format!("Failed to save interaction: {}", interaction.id))?;
    tracing::debug!(id = %interaction.id, school = %interaction.school_id, "saved interaction");
    Ok(())
}

pub fn load_interaction(work_dir: &WorkDir, id: &str) -> Result<Interaction> {
    let path = interaction_path(work_dir, id)?;
    if !path.exists() {
        anyhow::bail!("Interaction not found: {id}");
    }
    Interaction::load(&path).with_context(|| format!("Failed to parse interaction: {id}"))
}

/// Load every readable interaction, oldest first.
///
/// Records that fail to parse (including an unknown funnel stage) are skipped with a
/// warning so one bad file does not hide the rest of the history.
pub fn list_interactions(work_dir: &WorkDir) -> Result<Vec<Interaction>> {
    let dir = work_dir.interactions_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read interactions directory: {}", dir.display()))?;

    let mut interactions = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }

        match Interaction::load(&path) {
            Ok(interaction) => interactions.push(interaction),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %format!("{e:#}"),
                    "skipping unreadable interaction"
                );
            }
        }
    }

    interactions.sort_by(|a: &Interaction, b: &Interaction| {
        a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id))
    });
    Ok(interactions)
}
