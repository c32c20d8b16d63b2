use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::source::SourceKind;

/// Where one upstream observation service lives.
///
/// Example TOML:
/// [precipitation]
/// protocol = "http"
/// host = "localhost"
/// port = 5071
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEndpoint {
    pub protocol: String,
    pub host: String,
    pub port: u16,
}

impl SourceEndpoint {
    /// Observation query URL for a zip and trailing window.
    pub fn observation_url(&self, zip: &str, days: u16) -> String {
        format!(
            "{}://{}:{}/observation/{zip}?days={days}",
            self.protocol, self.host, self.port
        )
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub precipitation: SourceEndpoint,
    pub temperature: SourceEndpoint,

    /// Where persisted reports are appended. Defaults to the platform data
    /// directory when absent.
    pub report_path: Option<PathBuf>,
}

impl Config {
    pub fn endpoint(&self, kind: SourceKind) -> &SourceEndpoint {
        match kind {
            SourceKind::Precipitation => &self.precipitation,
            SourceKind::Temperature => &self.temperature,
        }
    }

    /// Load config from disk.
    ///
    /// Unlike credentials-style config there is no sensible default for the
    /// upstream endpoints, so a missing file is an error with a hint.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Err(anyhow!(
                "No configuration found at {}.\n\
                 Hint: run `weather-report configure` to set the upstream endpoints first.",
                path.display()
            ));
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolved report store path: configured value, or the platform default.
    pub fn report_store_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.report_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs()?;
        Ok(dirs.data_dir().join("reports.jsonl"))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-report", "weather-report")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}
