//! Per-calendar settings.

use std::path::Path;

use serde::Deserialize;

use crate::calendar::CalendarKind;
use crate::error::{CalmlyError, CalmlyResult};

/// Settings stored in a calendar's `.calmly/config.toml`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CalendarConfig {
    /// Display name; the directory name when unset
    pub name: Option<String>,
    #[serde(default)]
    pub kind: CalendarKind,
}

impl CalendarConfig {
    /// Load from `.calmly/config.toml`, or defaults if the file is absent.
    pub fn load(calendar_dir: &Path) -> CalmlyResult<Self> {
        let path = calendar_dir.join(".calmly/config.toml");

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content).map_err(|e| CalmlyError::Config(format!("{}: {}", path.display(), e)))
        } else {
            Ok(Self::default())
        }
    }
}
