use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const APP_QUALIFIER: &str = "org";
pub const APP_ORG: &str = "botwire";
pub const APP_NAME: &str = "botwire";
pub const CONFIG_ENV: &str = "BOTWIRE_CONFIG";
pub const CONFIG_FILE: &str = "settings.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Single-line JSON instead of pretty-printed.
    pub compact: bool,
    /// Wrap payloads as `{"method": ..., "payload": ...}`.
    pub include_method: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    pub parse_mode: Option<String>,
    /// Used when `--chat` is not given.
    pub chat: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    pub output: OutputSettings,
    pub defaults: DefaultSettings,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            compact: false,
            include_method: true,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl CliSettings {
    /// Resolve settings: explicit path, then `$BOTWIRE_CONFIG`, then the
    /// platform config directory. Only the last may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::read(Path::new(&path));
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => {
                debug!("no settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let data = fs::read(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = serde_json::from_slice(&data)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}
