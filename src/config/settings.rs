//! Runtime settings passed to the engine at construction

use crate::error::{AltLifeError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a settings file
pub const SETTINGS_ENV_VAR: &str = "ALT_LIFE_SETTINGS";

/// Engine-wide settings. Every field has a default, so a partial file works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Directory holding the static content files
    pub content_dir: PathBuf,
    /// Directory save slots are written to
    pub save_dir: PathBuf,
    /// Write the autosave slot after every mutation
    pub autosave: bool,
    /// Age at which a life ends regardless of health
    pub max_age: u32,
    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,
    pub aging: AgingRules,
    pub education: EducationRules,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            save_dir: PathBuf::from("saves"),
            autosave: true,
            max_age: 120,
            seed: None,
            aging: AgingRules::default(),
            education: EducationRules::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgingRules {
    pub decline_start_age: u32,
    pub health_decay_per_year: i64,
    pub happiness_decay_per_year: i64,
}

impl Default for AgingRules {
    fn default() -> Self {
        Self {
            decline_start_age: 50,
            health_decay_per_year: 2,
            happiness_decay_per_year: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationRules {
    pub weeks_per_term: u32,
    pub starting_gpa: f64,
    /// Minimum final GPA to graduate
    pub pass_gpa: f64,
}

impl Default for EducationRules {
    fn default() -> Self {
        Self {
            weeks_per_term: 12,
            starting_gpa: 2.0,
            pass_gpa: 2.0,
        }
    }
}

impl GameSettings {
    pub fn from_json_str(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| AltLifeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents).map_err(|source| AltLifeError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the file named by `ALT_LIFE_SETTINGS`, or fall back to defaults
    pub fn from_env() -> Self {
        let Some(path) = env::var_os(SETTINGS_ENV_VAR).map(PathBuf::from) else {
            tracing::info!(target: "alt_life::config", "settings.loaded=default");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(settings) => {
                tracing::info!(
                    target: "alt_life::config",
                    path = %path.display(),
                    "settings.loaded=file"
                );
                settings
            }
            Err(err) => {
                tracing::warn!(
                    target: "alt_life::config",
                    path = %path.display(),
                    error = %err,
                    "settings.load_failed, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Builder-style override of both directories
    pub fn with_dirs(mut self, content_dir: impl Into<PathBuf>, save_dir: impl Into<PathBuf>) -> Self {
        self.content_dir = content_dir.into();
        self.save_dir = save_dir.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
