//! `config.toml` handling.
//!
//! Lookup order: `.funnel/config.toml`, then `<user config dir>/funnel/config.toml`,
//! then built-in defaults. Missing sections and keys fall back to defaults.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::summary::StalenessThresholds;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelConfig {
    pub report: ReportConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Days at one stage still shown as fresh
    pub fresh_days: i64,
    /// Days at one stage before a school is flagged stale
    pub aging_days: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let thresholds = StalenessThresholds::default();
        Self {
            fresh_days: thresholds.fresh_days,
            aging_days: thresholds.aging_days,
        }
    }
}

impl ReportConfig {
    pub fn thresholds(&self) -> StalenessThresholds {
        StalenessThresholds {
            fresh_days: self.fresh_days,
            aging_days: self.aging_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive used when `FUNNEL_LOG` is unset
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl FunnelConfig {
    /// Load configuration for a `.funnel` directory.
    pub fn load(funnel_dir: &Path) -> Result<Self> {
        let local = funnel_dir.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Self::load_file(&local);
        }

        if let Some(global) = Self::global_path().filter(|p| p.exists()) {
            return Self::load_file(&global);
        }

        Ok(Self::default())
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config.toml")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("funnel").join(CONFIG_FILE_NAME))
    }

    fn validate(&self) -> Result<()> {
        let report = &self.report;
        if report.fresh_days < 0 {
            bail!("report.fresh_days must not be negative (got {})", report.fresh_days);
        }
        if report.aging_days < report.fresh_days {
            bail!(
                "report.aging_days ({}) must be at least report.fresh_days ({})",
                report.aging_days,
                report.fresh_days
            );
        }
        if self.log.level.trim().is_empty() {
            bail!("log.level must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FunnelConfig::from_toml("").unwrap();
        assert_eq!(config, FunnelConfig::default());
        assert_eq!(config.report.thresholds(), StalenessThresholds::default());
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_partial_sections_fill_missing_keys() {
        let config = FunnelConfig::from_toml("[report]\nfresh_days = 3\n").unwrap();
        assert_eq!(config.report.fresh_days, 3);
        assert_eq!(config.report.aging_days, 14);
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let err = FunnelConfig::from_toml("[report]\nfresh_days = 10\naging_days = 5\n")
            .unwrap_err();
        assert!(err.to_string().contains("aging_days"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = FunnelConfig::from_toml("[report\nfresh_days = ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config.toml"));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = FunnelConfig::default();
        config.report.aging_days = 30;
        config.log.level = "funnel=debug".to_string();

        let parsed = FunnelConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_prefers_local_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[log]\nlevel = \"info\"\n",
        )
        .unwrap();

        let config = FunnelConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.log.level, "info");
    }
}
