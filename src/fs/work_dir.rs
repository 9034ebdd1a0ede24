use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{FunnelConfig, CONFIG_FILE_NAME};

pub const WORK_DIR_NAME: &str = ".funnel";

const SCHOOLS_FILE_NAME: &str = "schools.yaml";

/// The `.funnel/` directory: interaction records, the school list and config.
pub struct WorkDir {
    root: PathBuf,
}

impl WorkDir {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            root: base_path.as_ref().join(WORK_DIR_NAME),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn interactions_dir(&self) -> PathBuf {
        self.root.join("interactions")
    }

    pub fn schools_file(&self) -> PathBuf {
        self.root.join(SCHOOLS_FILE_NAME)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn exists(&self) -> bool {
        self.root.exists()
    }

    pub fn initialize(&self) -> Result<()> {
        if self.exists() {
            bail!(".funnel directory already exists");
        }

        fs::create_dir_all(self.interactions_dir())
            .context("Failed to create .funnel/interactions directory")?;

        fs::write(self.schools_file(), "[]\n").context("Failed to create schools.yaml")?;

        let config = FunnelConfig::default().to_toml()?;
        fs::write(self.config_file(), config).context("Failed to create config.toml")?;

        self.create_readme()?;

        Ok(())
    }

    pub fn load(&self) -> Result<()> {
        if !self.exists() {
            bail!(".funnel directory does not exist. Run 'funnel init' first.");
        }

        let interactions = self.interactions_dir();
        if !interactions.exists() {
            fs::create_dir(&interactions)
                .context("Failed to create missing directory: interactions")?;
        }

        Ok(())
    }

    pub fn config(&self) -> Result<FunnelConfig> {
        FunnelConfig::load(&self.root)
    }

    fn create_readme(&self) -> Result<()> {
        let readme_content = r#"# funnel Work Directory

This directory is managed by the funnel CLI and contains:

- `interactions/` - One markdown file per logged school interaction
- `schools.yaml` - Schools and their assigned employees
- `config.toml` - Report thresholds and log level

Each school's current funnel stage is derived from its most recent interaction.
"#;

        fs::write(self.root.join("README.md"), readme_content)
            .context("Failed to create README.md")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_layout() {
        let temp_dir = TempDir::new().unwrap();
        let work_dir = WorkDir::new(temp_dir.path());

        work_dir.initialize().unwrap();
        assert!(work_dir.interactions_dir().is_dir());
        assert!(work_dir.schools_file().is_file());
        assert!(work_dir.config_file().is_file());
        assert!(work_dir.root().join("README.md").is_file());
        assert_eq!(work_dir.config().unwrap(), FunnelConfig::default());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp_dir = TempDir::new().unwrap();
        let work_dir = WorkDir::new(temp_dir.path());

        work_dir.initialize().unwrap();
        assert!(work_dir.initialize().is_err());
    }

    #[test]
    fn test_load_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        let err = WorkDir::new(temp_dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("funnel init"));
    }

    #[test]
    fn test_load_recreates_interactions_dir() {
        let temp_dir = TempDir::new().unwrap();
        let work_dir = WorkDir::new(temp_dir.path());
        work_dir.initialize().unwrap();
        fs::remove_dir(work_dir.interactions_dir()).unwrap();

        work_dir.load().unwrap();
        assert!(work_dir.interactions_dir().is_dir());
    }
}
