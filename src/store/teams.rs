use log::info;

use super::errors::{StoreError, StoreResult};
use super::{new_id, require_text, same_name, TournamentStore};
use crate::domain::{Team, TeamId, Teams, TournamentData};

impl TournamentStore {
    pub fn create_team(&mut self, name: &str) -> StoreResult<TeamId> {
        let name = require_text(name, "Team name")?;
        ensure_unique_team_name(&self.data, &name, None)?;

        let team_id = new_id();
        let team = Team::new(&name);
        self.commit(|data| {
            data.teams.insert(team_id.clone(), team);
            Ok(())
        })?;

        info!("Created team '{name}' ({team_id})");
        Ok(team_id)
    }

    pub fn rename_team(&mut self, team_id: &str, new_name: &str) -> StoreResult<()> {
        let new_name = require_text(new_name, "New team name")?;
        self.team(team_id)?;
        ensure_unique_team_name(&self.data, &new_name, Some(team_id))?;

        self.commit(|data| {
            let team = data.teams.get_mut(team_id).ok_or_else(|| team_not_found(team_id))?;
            team.name = new_name;
            Ok(())
        })
    }

    /// Removes the team, its players and every match it took part in
    pub fn delete_team(&mut self, team_id: &str) -> StoreResult<()> {
        let name = self.team(team_id)?.name.clone();

        let removed_matches = self.commit(|data| {
            data.teams.shift_remove(team_id);
            let before = data.matches.len();
            data.matches.retain(|_, m| !m.involves(team_id));
            Ok(before - data.matches.len())
        })?;

        info!("Deleted team '{name}' and {removed_matches} associated matches");
        Ok(())
    }

    pub fn team(&self, team_id: &str) -> StoreResult<&Team> {
        self.data.teams.get(team_id).ok_or_else(|| team_not_found(team_id))
    }

    pub fn teams(&self) -> &Teams {
        &self.data.teams
    }

    /// Resolves a team by exact id, then by case-insensitive name
    pub fn find_team(&self, name_or_id: &str) -> StoreResult<(&TeamId, &Team)> {
        let needle = name_or_id.trim();
        self.data
            .teams
            .get_key_value(needle)
            .or_else(|| self.data.teams.iter().find(|(_, t)| same_name(&t.name, needle)))
            .ok_or_else(|| StoreError::NotFound(format!("Team '{needle}' not found.")))
    }
}

fn ensure_unique_team_name(
    data: &TournamentData,
    name: &str,
    except: Option<&str>,
) -> StoreResult<()> {
    let taken = data
        .teams
        .iter()
        .filter(|(id, _)| Some(id.as_str()) != except)
        .any(|(_, t)| same_name(&t.name, name));
    if taken {
        return Err(StoreError::Duplicate(format!("Team '{name}' already exists.")));
    }
    Ok(())
}

pub(super) fn team_not_found(team_id: &str) -> StoreError {
    StoreError::NotFound(format!("Team '{team_id}' not found."))
}
