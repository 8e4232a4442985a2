use super::errors::StoreResult;
use super::{same_name, TournamentStore};
use crate::domain::{
    Match, MatchId, MatchSummary, PlayerPoints, TeamMatchSummary, TeamStanding, DRAW_LABEL,
};
use crate::scoring;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

impl TournamentStore {
    pub fn standings(&self) -> Vec<TeamStanding> {
        scoring::calculate_standings(&self.data.teams, &self.data.matches)
    }

    /// Player leaderboard, optionally narrowed to one skill level
    pub fn player_points(&self, skill: Option<&str>) -> Vec<PlayerPoints> {
        let rows = scoring::calculate_player_points(&self.data.teams, &self.data.matches);
        match skill {
            Some(skill) => scoring::filter_by_skill(rows, skill),
            None => rows,
        }
    }

    /// All matches, newest first, with current team names
    pub fn match_history(&self) -> Vec<MatchSummary> {
        self.sorted_matches()
            .into_iter()
            .map(|(id, m)| self.summarize(id, m))
            .collect()
    }

    pub fn latest_match(&self) -> Option<MatchSummary> {
        self.match_history().into_iter().next()
    }

    /// Matches of one team, newest first, seen from that team's side
    pub fn team_match_history(&self, team_id: &str) -> StoreResult<Vec<TeamMatchSummary>> {
        self.team(team_id)?;
        let rows = self
            .sorted_matches()
            .into_iter()
            .filter(|(_, record)| record.involves(team_id))
            .map(|(id, record)| {
                let summary = self.summarize(id, record);
                TeamMatchSummary {
                    opponent: if record.team1_id == team_id {
                        summary.team2_name
                    } else {
                        summary.team1_name
                    },
                    id: summary.id,
                    date: summary.date,
                    score: summary.score,
                    winner_name: summary.winner_name,
                }
            })
            .collect();
        Ok(rows)
    }

    /// Finds a match by its display date and both teams, in either order.
    /// Teams are given by id or by current name, ignoring case.
    pub fn find_match_id(&self, date: &str, team1: &str, team2: &str) -> Option<MatchId> {
        self.data
            .matches
            .iter()
            .find(|(_, m)| {
                m.timestamp.format(DATE_FORMAT).to_string() == date.trim()
                    && ((self.is_side(&m.team1_id, &m.team1_name, team1)
                        && self.is_side(&m.team2_id, &m.team2_name, team2))
                        || (self.is_side(&m.team1_id, &m.team1_name, team2)
                            && self.is_side(&m.team2_id, &m.team2_name, team1)))
            })
            .map(|(id, _)| id.clone())
    }

    /// Name lookups use the live team name, or the recorded one once the team is gone
    fn is_side(&self, team_id: &str, recorded_name: &str, needle: &str) -> bool {
        let needle = needle.trim();
        if team_id == needle {
            return true;
        }
        let name = self
            .data
            .teams
            .get(team_id)
            .map_or(recorded_name, |t| t.name.as_str());
        same_name(name, needle)
    }

    fn sorted_matches(&self) -> Vec<(&MatchId, &Match)> {
        let mut matches: Vec<(&MatchId, &Match)> = self.data.matches.iter().collect();
        matches.sort_by(|(_, a), (_, b)| b.timestamp.cmp(&a.timestamp));
        matches
    }

    fn summarize(&self, id: &MatchId, record: &Match) -> MatchSummary {
        let team_name = |team_id: &str, fallback: &str| {
            self.data
                .teams
                .get(team_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| fallback.to_string())
        };

        let winner_name = match record.winner_id.as_deref() {
            Some(winner) => team_name(winner, "Unknown Winner"),
            None => DRAW_LABEL.to_string(),
        };

        MatchSummary {
            id: id.clone(),
            date: record.timestamp.format(DATE_FORMAT).to_string(),
            team1_name: team_name(&record.team1_id, "Unknown Team 1"),
            score: record.score(),
            team2_name: team_name(&record.team2_id, "Unknown Team 2"),
            winner_name,
        }
    }
}
