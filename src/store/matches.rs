use chrono::Local;
use log::info;

use super::errors::{StoreError, StoreResult};
use super::teams::team_not_found;
use super::{new_id, TournamentStore};
use crate::domain::{Match, MatchId, Matches, SubMatch, Team, TeamId, DRAW_LABEL};
use crate::scoring::{self, MatchSide, MatchTally};

impl TournamentStore {
    /// Finalizes a team match from its sub-matches and stores the derived tally
    pub fn record_match(
        &mut self,
        team1_id: &str,
        team2_id: &str,
        sub_matches: Vec<SubMatch>,
    ) -> StoreResult<MatchId> {
        if team1_id == team2_id {
            return Err(StoreError::InputValidation(
                "Cannot record a match between the same team.".to_string(),
            ));
        }
        let teams = &self.data.teams;
        let (Some(team1), Some(team2)) = (teams.get(team1_id), teams.get(team2_id)) else {
            return Err(StoreError::NotFound(
                "One or both selected teams not found.".to_string(),
            ));
        };
        validate_sub_matches(&sub_matches, team1, team2)?;

        let tally = scoring::tally_sub_matches(&sub_matches, team1, team2);
        let (winner_id, winner_name) = decide(&tally, (team1_id, team1), (team2_id, team2));
        let record = Match {
            team1_id: team1_id.to_string(),
            team2_id: team2_id.to_string(),
            team1_name: team1.name.clone(),
            team2_name: team2.name.clone(),
            sub_matches,
            timestamp: Local::now().naive_local(),
            winner_name,
            winner_id,
            team1_sub_match_wins: tally.team1_wins,
            team2_sub_match_wins: tally.team2_wins,
        };
        let summary = format!(
            "Match between {} and {} recorded. Team winner: {} ({})",
            record.team1_name,
            record.team2_name,
            record.winner_name,
            record.score()
        );

        let match_id = new_id();
        self.commit(|data| {
            data.matches.insert(match_id.clone(), record);
            Ok(())
        })?;
        info!("{summary}");
        Ok(match_id)
    }

    /// Replaces the sub-matches and recomputes the tally. Teams and timestamp stay.
    pub fn update_match(&mut self, match_id: &str, sub_matches: Vec<SubMatch>) -> StoreResult<()> {
        let existing = self.match_record(match_id)?;
        let (team1_id, team2_id) = (existing.team1_id.as_str(), existing.team2_id.as_str());
        let team1 = self
            .data
            .teams
            .get(team1_id)
            .ok_or_else(|| team_not_found(team1_id))?;
        let team2 = self
            .data
            .teams
            .get(team2_id)
            .ok_or_else(|| team_not_found(team2_id))?;
        validate_sub_matches(&sub_matches, team1, team2)?;

        let tally = scoring::tally_sub_matches(&sub_matches, team1, team2);
        let (winner_id, winner_name) = decide(&tally, (team1_id, team1), (team2_id, team2));

        self.commit(|data| {
            let record = data
                .matches
                .get_mut(match_id)
                .ok_or_else(|| match_not_found(match_id))?;
            record.sub_matches = sub_matches;
            record.team1_sub_match_wins = tally.team1_wins;
            record.team2_sub_match_wins = tally.team2_wins;
            record.winner_id = winner_id;
            record.winner_name = winner_name;
            Ok(())
        })?;
        info!("Match {match_id} updated");
        Ok(())
    }

    pub fn delete_match(&mut self, match_id: &str) -> StoreResult<()> {
        self.match_record(match_id)?;
        self.commit(|data| {
            data.matches.shift_remove(match_id);
            Ok(())
        })
    }

    pub fn match_record(&self, match_id: &str) -> StoreResult<&Match> {
        self.data
            .matches
            .get(match_id)
            .ok_or_else(|| match_not_found(match_id))
    }

    pub fn matches(&self) -> &Matches {
        &self.data.matches
    }
}

/// Winner id and display label for a tally
fn decide(
    tally: &MatchTally,
    team1: (&str, &Team),
    team2: (&str, &Team),
) -> (Option<TeamId>, String) {
    let winner = match tally.winner() {
        Some(MatchSide::Team1) => team1,
        Some(MatchSide::Team2) => team2,
        None => return (None, DRAW_LABEL.to_string()),
    };
    (Some(winner.0.to_string()), winner.1.name.clone())
}

fn match_not_found(match_id: &str) -> StoreError {
    StoreError::NotFound(format!("Match '{match_id}' not found."))
}

fn validate_sub_matches(sub_matches: &[SubMatch], team1: &Team, team2: &Team) -> StoreResult<()> {
    if sub_matches.is_empty() {
        return Err(StoreError::InputValidation(
            "Cannot record a match with no sub-matches.".to_string(),
        ));
    }
    for (idx, sub_match) in sub_matches.iter().enumerate() {
        validate_sub_match(sub_match, team1, team2)
            .map_err(|e| prefix_message(e, &format!("Sub-match {}", idx + 1)))?;
    }
    Ok(())
}

fn validate_sub_match(sub_match: &SubMatch, team1: &Team, team2: &Team) -> StoreResult<()> {
    validate_side(sub_match, &sub_match.team1_player_ids, team1)?;
    validate_side(sub_match, &sub_match.team2_player_ids, team2)?;

    // Winners from both sides are accepted and score for neither team.
    let winners = &sub_match.winner_player_ids;
    if let Some(stranger) = winners.iter().find(|id| !sub_match.is_participant(id)) {
        return Err(StoreError::InvalidReference(format!(
            "winner '{stranger}' did not play in it"
        )));
    }
    if let Some((_, repeated)) = winners
        .iter()
        .enumerate()
        .find(|(idx, id)| winners[..*idx].contains(id))
    {
        return Err(StoreError::InputValidation(format!(
            "winner '{repeated}' is listed more than once"
        )));
    }
    Ok(())
}

fn validate_side(sub_match: &SubMatch, player_ids: &[String], team: &Team) -> StoreResult<()> {
    let expected = sub_match.kind.side_size();
    if player_ids.len() != expected {
        return Err(StoreError::InputValidation(format!(
            "{} needs {expected} player(s) from '{}', got {}",
            sub_match.kind.as_str(),
            team.name,
            player_ids.len()
        )));
    }
    if player_ids.len() == 2 && player_ids[0] == player_ids[1] {
        return Err(StoreError::InputValidation(format!(
            "players from '{}' must be different",
            team.name
        )));
    }
    if let Some(stranger) = player_ids.iter().find(|id| !team.has_player(id)) {
        return Err(StoreError::InvalidReference(format!(
            "player '{stranger}' does not belong to '{}'",
            team.name
        )));
    }
    Ok(())
}

fn prefix_message(error: StoreError, prefix: &str) -> StoreError {
    match error {
        StoreError::InputValidation(msg) => StoreError::InputValidation(format!("{prefix}: {msg}")),
        StoreError::InvalidReference(msg) => {
            StoreError::InvalidReference(format!("{prefix}: {msg}"))
        }
        other => other,
    }
}
