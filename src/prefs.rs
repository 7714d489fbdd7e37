//! Settings remembered between runs

use crate::{assemble::OutputFormat,
            error::{DeckError, Result}};
use serde::{Deserialize, Serialize};
use std::{fs,
          io::ErrorKind,
          path::{Path, PathBuf}};

const PREFS_FILE: &str = "deckgrab.json";

/// Last-used URL and preferred output format, stored as JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub last_url: Option<String>,
    pub default_format: OutputFormat,
}

impl Preferences {
    /// `deckgrab/deckgrab.json` in the platform config directory, or in the working directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("deckgrab").join(PREFS_FILE))
            .unwrap_or_else(|| PathBuf::from(PREFS_FILE))
    }

    /// Read preferences from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(DeckError::Preferences(format!("Failed to read {}: {}", path.display(), e))),
        };

        serde_json::from_str(&text)
            .map_err(|e| DeckError::Preferences(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| DeckError::Preferences(format!("Failed to create {}: {}", parent.display(), e)))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| DeckError::Preferences(e.to_string()))?;
        fs::write(path, json).map_err(|e| DeckError::Preferences(format!("Failed to write {}: {}", path.display(), e)))
    }

    /// Remember the URL and format of the job being started
    pub fn remember_job(&mut self, url: &str, format: OutputFormat) {
        self.last_url = Some(url.to_string());
        self.default_format = format;
    }
}
