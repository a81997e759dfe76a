//! Global calmly configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use crate::error::{CalmlyError, CalmlyResult};

static DEFAULT_CALENDAR_DIR: &str = "~/calendar";

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

/// Global configuration at `<config dir>/calmly/config.toml`.
///
/// The file is optional and never written by calmly. Per-calendar settings
/// live in each calendar's `.calmly/config.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct CalmlyConfig {
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,
}

impl Default for CalmlyConfig {
    fn default() -> Self {
        CalmlyConfig {
            calendar_dir: default_calendar_dir(),
        }
    }
}

impl CalmlyConfig {
    pub fn config_path() -> CalmlyResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalmlyError::Config("Could not determine config directory".into()))?
            .join("calmly");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> CalmlyResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load_from(path: &Path) -> CalmlyResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| CalmlyError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalmlyError::Config(e.to_string()))
    }

    /// The calendar directory with `~` expanded.
    pub fn calendar_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.calendar_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }
}
