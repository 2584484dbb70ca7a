//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use kubedash_common::DashboardConfig;

use crate::application::ports::ConfigStore;

/// Production implementation of `ConfigStore` that reads a YAML file on disk.
///
/// The path is, in order: the explicit override (`--config` /
/// `KUBEDASH_CONFIG`), then `~/.kubedash/config.yaml`.
#[derive(Debug, Default)]
pub struct YamlConfigStore {
    path_override: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(path_override: Option<PathBuf>) -> Self {
        Self { path_override }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<DashboardConfig> {
        let path = self.path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(DashboardConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path_override {
            return Ok(path.clone());
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".kubedash").join("config.yaml"))
    }
}
