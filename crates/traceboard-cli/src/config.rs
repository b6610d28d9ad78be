use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use traceboard_types::{Error, Result};

/// Dashboard-rendering preferences.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    /// Overview banner title; `--title` on the command line wins over this.
    #[serde(default)]
    pub title: Option<String>,

    /// Subset of sheet names to render. Absent means the full fixed set.
    #[serde(default)]
    pub sheets: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Load from an explicit path, or the default location. A missing file
    /// loads defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("traceboard").join("config.toml"))
    }
}
