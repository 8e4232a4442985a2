use serde::{Deserialize, Serialize};

use super::models::{MatchId, PlayerId, TeamId};

/// One row of the team standings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub matches_played: u32,
}

impl TeamStanding {
    pub fn new(team_id: &str, name: &str) -> Self {
        Self {
            team_id: team_id.to_string(),
            name: name.to_string(),
            wins: 0,
            losses: 0,
            draws: 0,
            matches_played: 0,
        }
    }
}

/// One row of the player leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPoints {
    pub player_id: PlayerId,
    pub name: String,
    pub team_name: String,
    pub skill: String,
    pub points: u32,
}

/// Display row for the match history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub id: MatchId,
    pub date: String,
    pub team1_name: String,
    pub score: String,
    pub team2_name: String,
    pub winner_name: String,
}

/// Match history row seen from one team's side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMatchSummary {
    pub id: MatchId,
    pub date: String,
    pub opponent: String,
    pub score: String,
    pub winner_name: String,
}
