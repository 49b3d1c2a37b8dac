use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    launch::classpath::ProjectNode,
};

/// Settings file names probed while walking up from the working directory
const SETTINGS_FILE_NAMES: &[&str] = &[".modrun.json", "modrun.json"];

/// Launch settings loaded from a `.modrun.json` file
///
/// This file is the named configuration source of the option resolver: the
/// `scanners` table supplies per-scheme defaults consulted after explicit
/// spec options and before the hardcoded scheme defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_start_level: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vm_arguments: Vec<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub system_properties: HashMap<String, String>,

    /// Root directory of the local artifact repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<PathBuf>,

    /// Per-scheme option defaults, keyed by scheme name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub scanners: HashMap<String, ScannerDefaults>,

    /// Declared project graph used for classpath assembly
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectNode>,
}

/// Configured defaults for one scanner
///
/// Values are kept as raw strings: the configuration source is stringly, and
/// a malformed value must degrade to "unset" at resolve time instead of
/// failing the file load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScannerDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
}

impl Settings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)
            .map_err(|e| Error::Other(format!("Failed to parse settings: {e}")))?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Walk up from `start_path` looking for a settings file
    pub fn find_settings_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in SETTINGS_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.exists() {
                    return Some(candidate);
                }
            }
            current = current.parent()?;
        }
    }

    /// Load the nearest settings file, or defaults when none exists
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_settings_file(start_path) {
            Some(path) => {
                tracing::debug!("loading settings from {:?}", path);
                Self::load_from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
