//! Save slots: one JSON blob per named slot under the save directory
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: the format written today. Bump it when fields change.
//! - `MIN_COMPATIBLE_VERSION`: oldest format still readable. Adding defaulted
//!   fields keeps it; renaming or removing fields raises it.

use crate::character::Character;
use crate::education::EducationTracker;
use crate::error::{AltLifeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SAVE_VERSION: u32 = 1;
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// Slot written after every session mutation
pub const AUTOSAVE_SLOT: &str = "autosave";

const SAVE_EXTENSION: &str = "json";
const MAX_SAVE_NAME_LEN: usize = 64;

/// Seconds since the unix epoch, 0 if the clock is before it
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Save names are 1-64 characters of `[A-Za-z0-9_-]`
pub fn validate_save_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_SAVE_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(AltLifeError::InvalidSaveName(name.to_string()))
    }
}

/// Full game snapshot stored in one slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSave {
    pub version: u32,
    pub name: String,
    /// Unix seconds
    pub saved_at: u64,
    pub character: Character,
    #[serde(default)]
    pub education: EducationTracker,
    /// Drawn event still waiting for an answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_event: Option<String>,
}

impl GameSave {
    pub fn new(name: impl Into<String>, character: Character, education: EducationTracker) -> Self {
        Self {
            version: SAVE_VERSION,
            name: name.into(),
            saved_at: unix_now(),
            character,
            education,
            pending_event: None,
        }
    }

    pub fn with_pending_event(mut self, event_id: Option<String>) -> Self {
        self.pending_event = event_id;
        self
    }
}

/// Directory-backed slot store
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_save_name(name)?;
        Ok(self.dir.join(format!("{name}.{SAVE_EXTENSION}")))
    }

    /// Write a slot, replacing any previous content atomically
    pub fn try_save(&self, save: &GameSave) -> Result<PathBuf> {
        let path = self.path_for(&save.name)?;
        fs::create_dir_all(&self.dir).map_err(|source| AltLifeError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let json = serde_json::to_string_pretty(save)?;
        let tmp = path.with_extension(format!("{SAVE_EXTENSION}.tmp"));
        fs::write(&tmp, json).map_err(|source| AltLifeError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| AltLifeError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(
            target: "alt_life::save",
            slot = %save.name,
            path = %path.display(),
            "save.written"
        );
        Ok(path)
    }

    /// Write a slot, logging instead of failing
    pub fn save(&self, save: &GameSave) -> bool {
        match self.try_save(save) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(
                    target: "alt_life::save",
                    slot = %save.name,
                    error = %err,
                    "save.write_failed"
                );
                false
            }
        }
    }

    pub fn try_load(&self, name: &str) -> Result<GameSave> {
        let path = self.path_for(name)?;
        let contents = fs::read_to_string(&path).map_err(|source| AltLifeError::Io {
            path: path.clone(),
            source,
        })?;
        let save: GameSave = serde_json::from_str(&contents)
            .map_err(|source| AltLifeError::Parse { path, source })?;

        if !(MIN_COMPATIBLE_VERSION..=SAVE_VERSION).contains(&save.version) {
            return Err(AltLifeError::SaveVersion {
                found: save.version,
                expected: SAVE_VERSION,
            });
        }
        Ok(save)
    }

    /// Read a slot, logging and returning `None` on any failure
    pub fn load(&self, name: &str) -> Option<GameSave> {
        match self.try_load(name) {
            Ok(save) => Some(save),
            Err(err) => {
                tracing::warn!(
                    target: "alt_life::save",
                    slot = name,
                    error = %err,
                    "save.load_failed"
                );
                None
            }
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map_or(false, |p| p.is_file())
    }

    /// Names of all slots, sorted
    pub fn list_slots(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().map_or(false, |ext| ext == SAVE_EXTENSION))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .filter(|name| validate_save_name(name).is_ok())
            .collect();
        names.sort();
        names
    }

    /// Remove a slot. `Ok(false)` when it did not exist.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(target: "alt_life::save", slot = name, "save.deleted");
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(AltLifeError::Io { path, source }),
        }
    }

    /// Write a slot on tokio's blocking pool
    pub async fn save_async(&self, save: GameSave) -> Result<PathBuf> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.try_save(&save))
            .await
            .map_err(|err| AltLifeError::Task(err.to_string()))?
    }
}
