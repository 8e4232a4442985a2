use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use crate::domain::TournamentData;

const REQUIRED_KEYS: [&str; 3] = ["teams", "matches", "skill_levels"];

/// Result of reading the document at startup
#[derive(Debug)]
pub struct LoadedDocument {
    pub data: TournamentData,
    /// The file was corrupt and has been discarded
    pub recovered: bool,
}

/// JSON file holding the whole tournament document
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, starting fresh when it is missing or corrupt
    pub fn load(&self, default_skill_levels: &[String]) -> StoreResult<LoadedDocument> {
        if !self.path.exists() {
            info!("No data file at {}, starting with new data", self.path.display());
            return Ok(fresh(default_skill_levels, false));
        }

        let json = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        match serde_json::from_str::<TournamentData>(&json) {
            Ok(data) => {
                info!(
                    "Loaded {} teams and {} matches from {}",
                    data.teams.len(),
                    data.matches.len(),
                    self.path.display()
                );
                Ok(LoadedDocument {
                    data,
                    recovered: false,
                })
            }
            Err(e) => {
                warn!(
                    "Could not load data from {} ({e}). File might be corrupted, starting with new data",
                    self.path.display()
                );
                fs::remove_file(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
                Ok(fresh(default_skill_levels, true))
            }
        }
    }

    /// Reads the document as is; a corrupt file is reported, never discarded
    pub fn read_snapshot(&self, default_skill_levels: &[String]) -> StoreResult<TournamentData> {
        if !self.path.exists() {
            return Ok(fresh(default_skill_levels, false).data);
        }

        let json = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Overwrites the document; the old file stays until the new one is complete
    pub fn save(&self, data: &TournamentData) -> StoreResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        write_json(&tmp, data)?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }
}

fn fresh(default_skill_levels: &[String], recovered: bool) -> LoadedDocument {
    LoadedDocument {
        data: TournamentData::with_skill_levels(default_skill_levels.to_vec()),
        recovered,
    }
}

/// Writes the whole document to an arbitrary path
pub fn export_to(path: &Path, data: &TournamentData) -> StoreResult<()> {
    write_json(path, data)?;
    info!("Exported tournament data to {}", path.display());
    Ok(())
}

/// Reads and validates a document for import without touching any store
pub fn read_import(path: &Path) -> StoreResult<TournamentData> {
    let json = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let value: Value = serde_json::from_str(&json).map_err(|e| {
        StoreError::InputValidation(format!("Could not parse {}: {e}", path.display()))
    })?;

    check_required_keys(&value)?;

    serde_json::from_value(value).map_err(|e| {
        StoreError::InputValidation(format!("Invalid tournament data in {}: {e}", path.display()))
    })
}

fn check_required_keys(value: &Value) -> StoreResult<()> {
    let Some(object) = value.as_object() else {
        return Err(StoreError::InputValidation(
            "Tournament data must be a JSON object".to_string(),
        ));
    };

    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(StoreError::InputValidation(format!(
            "File is missing required tournament data keys: {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

fn write_json(path: &Path, data: &TournamentData) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).map_err(|e| StoreError::io(path, e))
}
