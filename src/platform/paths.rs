use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::ProjectDirs;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "stockboard")
        .ok_or_else(|| anyhow!("unable to resolve home directory"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("dashboards.toml"))
}

pub fn default_export_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("exports"))
}
