use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::models::interaction::Interaction;
use crate::parser::frontmatter::parse_from_markdown;

/// Types stored as markdown files with YAML frontmatter.
///
/// The frontmatter is the source of truth; the markdown body is for humans
/// browsing the work directory.
pub trait MarkdownSerializable: Sized {
    fn from_markdown(content: &str) -> Result<Self>;

    fn to_markdown(&self) -> Result<String>;

    fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_markdown(&content)
    }

    /// Creates parent directories if they don't exist.
    fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_markdown()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

impl MarkdownSerializable for Interaction {
    fn from_markdown(content: &str) -> Result<Self> {
        parse_from_markdown(content, "Interaction")
    }

    fn to_markdown(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize interaction")?;

        let mut content = String::new();
        content.push_str("---\n");
        content.push_str(&yaml);
        content.push_str("---\n\n");
        content.push_str(&format!(
            "# Visit to {} ({})\n\n",
            self.school_id,
            self.funnel_stage.label()
        ));
        content.push_str(&format!(
            "Logged by {} on {} at {}\n\n",
            self.employee_id,
            self.date,
            crate::models::clock_time::format(&self.time)
        ));
        content.push_str("## Comments\n\n");
        content.push_str(&self.comments);
        content.push_str("\n\n## Next Step\n\n");
        content.push_str(&format!(
            "- {} on {} at {}\n",
            self.next_step.action,
            self.next_step.schedule_date,
            crate::models::clock_time::format(&self.next_step.schedule_time)
        ));

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interaction::InteractionDraft;
    use crate::models::stage::FunnelStage;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use tempfile::TempDir;

    fn sample() -> Interaction {
        let mut draft = InteractionDraft::new("school-1", "emp-1");
        draft.set_comments("Discussed the pilot\n---\nand pricing");
        draft.set_stage(FunnelStage::Consideration);
        draft.select_action("Offer trial / pilot program");
        draft.schedule(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        );
        draft
            .commit(
                "visit-1".to_string(),
                Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_interaction_markdown_has_frontmatter_and_body() {
        let markdown = sample().to_markdown().expect("Should serialize interaction");
        assert!(markdown.starts_with("---\n"));
        assert!(markdown.contains("# Visit to school-1 (Consideration)"));
        assert!(markdown.contains("- Offer trial / pilot program on 2024-02-01 at 09:00"));
    }

    #[test]
    fn test_interaction_save_and_load() {
        let temp_dir = TempDir::new().expect("Should create temp dir");
        let file_path = temp_dir.path().join("interactions").join("visit-1.md");

        let interaction = sample();
        interaction.save(&file_path).expect("Should save interaction");

        let loaded = Interaction::load(&file_path).expect("Should load interaction");
        assert_eq!(loaded, interaction);
    }
}
