use log::info;

use super::errors::{StoreError, StoreResult};
use super::{require_text, same_name, TournamentStore};

impl TournamentStore {
    pub fn skill_levels(&self) -> &[String] {
        &self.data.skill_levels
    }

    pub fn add_skill_level(&mut self, skill: &str) -> StoreResult<()> {
        let skill = require_text(skill, "Skill level name")?;
        if self.data.skill_levels.iter().any(|s| same_name(s, &skill)) {
            return Err(StoreError::Duplicate(format!("Skill level '{skill}' already exists.")));
        }

        self.commit(|data| {
            data.skill_levels.push(skill);
            Ok(())
        })
    }

    /// Fails while any player still uses the level
    pub fn remove_skill_level(&mut self, skill: &str) -> StoreResult<()> {
        if !self.data.has_skill_level(skill) {
            return Err(StoreError::NotFound(format!("Skill level '{skill}' not found.")));
        }

        let holder = self.data.teams.values().find_map(|team| {
            team.players
                .values()
                .find(|p| p.skill == skill)
                .map(|p| (team.name.as_str(), p.name.as_str()))
        });
        if let Some((team_name, player_name)) = holder {
            return Err(StoreError::Cascade(format!(
                "Cannot remove skill level '{skill}' because player '{player_name}' in team '{team_name}' uses it. Please update or remove affected players first."
            )));
        }

        self.commit(|data| {
            data.skill_levels.retain(|s| s != skill);
            Ok(())
        })?;
        info!("Removed skill level '{skill}'");
        Ok(())
    }
}
