use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use storyscan_core::extraction::domain::extraction_config::ExtractionConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub extraction: ExtractionConfig,
    /// Story file to search for instead of the built-in story.
    pub story: Option<PathBuf>,
    /// Worker threads for batch extraction; 0 uses every available core.
    pub workers: usize,
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("StoryScan").join("settings.json"))
    }

    /// User settings, or defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file: {e}");
                Self::default()
            }
        }
    }

    /// Settings from an explicit file. Unlike [`load`](Self::load), a
    /// missing or malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings {}: {e}", path.display()))?;
        serde_json::from_str(&json)
            .map_err(|e| format!("Invalid settings {}: {e}", path.display()).into())
    }
}
