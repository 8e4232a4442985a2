use log::info;

use super::errors::{StoreError, StoreResult};
use super::teams::team_not_found;
use super::{new_id, require_text, same_name, TournamentStore};
use crate::domain::{Player, PlayerId, Players, Team, TournamentData, UNKNOWN_PLAYER};

impl TournamentStore {
    pub fn add_player(&mut self, team_id: &str, name: &str, skill: &str) -> StoreResult<PlayerId> {
        let name = require_text(name, "Player name")?;
        let skill = require_text(skill, "Skill level")?;
        let team = self.team(team_id)?;
        ensure_known_skill(&self.data, &skill)?;
        ensure_unique_player_name(team, &name, None)?;

        let player_id = new_id();
        let player = Player::new(&name, &skill);
        self.commit(|data| {
            let team = data.teams.get_mut(team_id).ok_or_else(|| team_not_found(team_id))?;
            team.players.insert(player_id.clone(), player);
            Ok(())
        })?;

        info!("Added player '{name}' to team {team_id}");
        Ok(player_id)
    }

    pub fn update_player(
        &mut self,
        team_id: &str,
        player_id: &str,
        new_name: &str,
        new_skill: &str,
    ) -> StoreResult<()> {
        let new_name = require_text(new_name, "New player name")?;
        let new_skill = require_text(new_skill, "New skill level")?;
        let team = self.team(team_id)?;
        if !team.has_player(player_id) {
            return Err(player_not_found(player_id));
        }
        ensure_known_skill(&self.data, &new_skill)?;
        ensure_unique_player_name(team, &new_name, Some(player_id))?;

        self.commit(|data| {
            let player = data
                .teams
                .get_mut(team_id)
                .and_then(|t| t.players.get_mut(player_id))
                .ok_or_else(|| player_not_found(player_id))?;
            player.name = new_name;
            player.skill = new_skill;
            Ok(())
        })
    }

    /// Removes the player from the roster. Recorded matches keep their ids.
    pub fn remove_player(&mut self, team_id: &str, player_id: &str) -> StoreResult<()> {
        if !self.team(team_id)?.has_player(player_id) {
            return Err(player_not_found(player_id));
        }

        self.commit(|data| {
            let team = data.teams.get_mut(team_id).ok_or_else(|| team_not_found(team_id))?;
            team.players.shift_remove(player_id);
            Ok(())
        })
    }

    pub fn players(&self, team_id: &str) -> StoreResult<&Players> {
        Ok(&self.team(team_id)?.players)
    }

    /// Resolves a player of one team by exact id, then by case-insensitive name
    pub fn find_player(
        &self,
        team_id: &str,
        name_or_id: &str,
    ) -> StoreResult<(&PlayerId, &Player)> {
        let team = self.team(team_id)?;
        let needle = name_or_id.trim();
        team.players
            .get_key_value(needle)
            .or_else(|| team.players.iter().find(|(_, p)| same_name(&p.name, needle)))
            .ok_or_else(|| {
                StoreError::NotFound(format!("Player '{needle}' not found in '{}'.", team.name))
            })
    }

    pub fn player_name(&self, player_id: &str) -> &str {
        self.data
            .player(player_id)
            .map(|(_, player)| player.name.as_str())
            .unwrap_or(UNKNOWN_PLAYER)
    }
}

fn ensure_known_skill(data: &TournamentData, skill: &str) -> StoreResult<()> {
    if !data.has_skill_level(skill) {
        return Err(StoreError::InvalidReference(format!(
            "Skill level '{skill}' is not recognized. Please add it first."
        )));
    }
    Ok(())
}

fn ensure_unique_player_name(team: &Team, name: &str, except: Option<&str>) -> StoreResult<()> {
    let taken = team
        .players
        .iter()
        .filter(|(id, _)| Some(id.as_str()) != except)
        .any(|(_, p)| same_name(&p.name, name));
    if taken {
        return Err(StoreError::Duplicate(format!(
            "Player '{name}' already exists in '{}'.",
            team.name
        )));
    }
    Ok(())
}

fn player_not_found(player_id: &str) -> StoreError {
    StoreError::NotFound(format!("Player '{player_id}' not found in this team."))
}

#[cfg(test)]
mod tests {
    use crate::domain::UNKNOWN_PLAYER;
    use crate::store::test_support::open_store;
    use crate::store::ErrorKind;

    #[test]
    fn test_add_player_checks() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let team = store.create_team("Falcons").unwrap();
        store.add_player(&team, "Ann", "Expert").unwrap();

        let duplicate = store.add_player(&team, "ann", "Beginner").unwrap_err();
        let bad_skill = store.add_player(&team, "Bo", "Grandmaster").unwrap_err();
        let no_team = store.add_player("missing", "Bo", "Expert").unwrap_err();
        let no_skill = store.add_player(&team, "Bo", "").unwrap_err();

        assert_eq!(duplicate.kind(), ErrorKind::Duplicate);
        assert_eq!(bad_skill.kind(), ErrorKind::InvalidReference);
        assert_eq!(no_team.kind(), ErrorKind::NotFound);
        assert_eq!(no_skill.kind(), ErrorKind::InputValidation);
        assert_eq!(store.players(&team).unwrap().len(), 1);
    }

    #[test]
    fn test_same_player_name_allowed_in_other_team() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let falcons = store.create_team("Falcons").unwrap();
        let owls = store.create_team("Owls").unwrap();

        store.add_player(&falcons, "Ann", "Expert").unwrap();
        store.add_player(&owls, "Ann", "Expert").unwrap();

        assert_eq!(store.players(&owls).unwrap().len(), 1);
    }

    #[test]
    fn test_update_player() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let team = store.create_team("Falcons").unwrap();
        let ann = store.add_player(&team, "Ann", "Beginner").unwrap();
        store.add_player(&team, "Bo", "Beginner").unwrap();

        assert_eq!(
            store.update_player(&team, &ann, "BO", "Expert").unwrap_err().kind(),
            ErrorKind::Duplicate
        );
        assert_eq!(
            store.update_player(&team, "ghost", "Cy", "Expert").unwrap_err().kind(),
            ErrorKind::NotFound
        );

        store.update_player(&team, &ann, "Annie", "Expert").unwrap();
        let (id, updated) = store.find_player(&team, "annie").unwrap();
        assert_eq!(id, &ann);
        assert_eq!(updated.skill, "Expert");
    }

    #[test]
    fn test_remove_player() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let team = store.create_team("Falcons").unwrap();
        let ann = store.add_player(&team, "Ann", "Beginner").unwrap();

        store.remove_player(&team, &ann).unwrap();

        assert!(store.players(&team).unwrap().is_empty());
        assert_eq!(store.player_name(&ann), UNKNOWN_PLAYER);
        assert_eq!(
            store.remove_player(&team, &ann).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
