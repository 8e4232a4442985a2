//! In-memory tournament store with whole-document persistence.
//!
//! Every mutation is applied to a staged copy of the document. The copy is
//! written to disk and only replaces the in-memory document once the write
//! succeeded, so a failed save leaves the store exactly as it was.

pub mod document;
pub mod errors;
mod history;
mod matches;
mod players;
mod skills;
mod teams;

use log::{info, warn};
use std::path::Path;

use crate::domain::TournamentData;
use crate::mirror::{self, LeaderboardMirror};
use crate::scoring;

pub use document::{DocumentFile, LoadedDocument};
pub use errors::{ErrorKind, StoreError, StoreResult};
pub use history::DATE_FORMAT;

pub struct TournamentStore {
    data: TournamentData,
    file: DocumentFile,
    default_skill_levels: Vec<String>,
    recovered: bool,
    mirror: Option<Box<dyn LeaderboardMirror>>,
}

impl TournamentStore {
    /// Loads the document behind `file`, or starts a fresh one
    pub fn open(file: DocumentFile, default_skill_levels: Vec<String>) -> StoreResult<Self> {
        let LoadedDocument { data, recovered } = file.load(&default_skill_levels)?;
        Ok(Self {
            data,
            file,
            default_skill_levels,
            recovered,
            mirror: None,
        })
    }

    /// Store over the current file contents that never repairs the file
    pub fn snapshot(file: DocumentFile, default_skill_levels: Vec<String>) -> StoreResult<Self> {
        let data = file.read_snapshot(&default_skill_levels)?;
        Ok(Self {
            data,
            file,
            default_skill_levels,
            recovered: false,
            mirror: None,
        })
    }

    pub fn with_mirror(mut self, mirror: Box<dyn LeaderboardMirror>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    pub fn data(&self) -> &TournamentData {
        &self.data
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// True when the document on disk was corrupt and got replaced
    pub fn was_recovered(&self) -> bool {
        self.recovered
    }

    /// Drops every team, player and match and restores the default skill levels
    pub fn reset(&mut self) -> StoreResult<()> {
        let defaults = self.default_skill_levels.clone();
        self.commit(|data| {
            *data = TournamentData::with_skill_levels(defaults);
            Ok(())
        })?;
        info!("Tournament data reset");
        Ok(())
    }

    pub fn export(&self, path: &Path) -> StoreResult<()> {
        document::export_to(path, &self.data)
    }

    /// Replaces the whole store with a validated document read from `path`
    pub fn import(&mut self, path: &Path) -> StoreResult<()> {
        let imported = document::read_import(path)?;
        let (teams, matches) = (imported.teams.len(), imported.matches.len());
        self.commit(|data| {
            *data = imported;
            Ok(())
        })?;
        info!("Imported {teams} teams and {matches} matches from {}", path.display());
        Ok(())
    }

    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut TournamentData) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut staged = self.data.clone();
        let value = change(&mut staged)?;
        self.file.save(&staged)?;
        self.data = staged;
        self.sync_mirror();
        Ok(value)
    }

    fn sync_mirror(&self) {
        let Some(target) = self.mirror.as_deref() else {
            return;
        };

        let standings = scoring::calculate_standings(&self.data.teams, &self.data.matches);
        let players = scoring::calculate_player_points(&self.data.teams, &self.data.matches);
        if let Err(e) = mirror::publish_leaderboards(target, &standings, &players) {
            warn!("Leaderboard mirror update failed: {e:#}");
        }
    }
}

/// Case-insensitive name comparison used for every uniqueness rule
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn require_text(value: &str, field: &str) -> StoreResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(StoreError::InputValidation(format!("{field} cannot be empty.")));
    }
    Ok(value.to_string())
}
