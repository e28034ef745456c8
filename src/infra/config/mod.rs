pub mod presets;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::Deserialize;

use crate::domain::entities::dashboard::DashboardConfig;
use crate::platform::paths::default_config_path;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8060";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    export_dir: Option<PathBuf>,
    #[serde(default, rename = "dashboard")]
    dashboards: Vec<DashboardConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub export_dir: Option<PathBuf>,
    pub dashboards: Vec<DashboardConfig>,
}

impl AppConfig {
    pub fn builtin() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            export_dir: None,
            dashboards: presets::builtin(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text).context("failed to parse dashboard config")?;

        let mut config = Self::builtin();
        if let Some(base_url) = file.base_url {
            config.base_url = base_url;
        }
        config.export_dir = file.export_dir;
        let mut seen = BTreeSet::new();
        for dashboard in file.dashboards {
            if !seen.insert(dashboard.name.clone()) {
                bail!("duplicate dashboard name: {}", dashboard.name)
            }
            match config
                .dashboards
                .iter_mut()
                .find(|existing| existing.name == dashboard.name)
            {
                Some(existing) => *existing = dashboard,
                None => config.dashboards.push(dashboard),
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("invalid config: {}", path.display()))?;
        info!(
            "loaded {} dashboards from {}",
            config.dashboards.len(),
            path.display()
        );
        Ok(config)
    }

    // An explicit path must exist; otherwise the platform config file is used
    // when present, and the built-in presets when not.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Ok(path) if path.exists() => Self::load(&path),
            Ok(path) => {
                debug!("no config at {}, using built-in dashboards", path.display());
                Ok(Self::builtin())
            }
            Err(err) => {
                debug!("{err:#}; using built-in dashboards");
                Ok(Self::builtin())
            }
        }
    }

    pub fn dashboard(&self, name: &str) -> Option<&DashboardConfig> {
        self.dashboards.iter().find(|dashboard| dashboard.name == name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("base_url must not be empty")
        }
        let mut names = BTreeSet::new();
        for dashboard in &self.dashboards {
            if let Err(message) = dashboard.validate() {
                bail!(message)
            }
            if !names.insert(dashboard.name.as_str()) {
                bail!("duplicate dashboard name: {}", dashboard.name)
            }
        }
        Ok(())
    }
}
