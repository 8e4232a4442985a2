use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type TeamId = String;
pub type PlayerId = String;
pub type MatchId = String;

/// Records keyed by id, in insertion order
pub type Teams = IndexMap<TeamId, Team>;
pub type Players = IndexMap<PlayerId, Player>;
pub type Matches = IndexMap<MatchId, Match>;

pub const DRAW_LABEL: &str = "Draw";
pub const UNKNOWN_PLAYER: &str = "Unknown Player";

/// Skill levels seeded into a fresh document
pub fn default_skill_levels() -> Vec<String> {
    ["Beginner", "Intermediate", "Advanced", "Expert"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Whole persisted document: teams, matches and the skill vocabulary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentData {
    pub teams: Teams,
    pub matches: Matches,
    pub skill_levels: Vec<String>,
}

impl Default for TournamentData {
    fn default() -> Self {
        Self::with_skill_levels(default_skill_levels())
    }
}

impl TournamentData {
    pub fn with_skill_levels(skill_levels: Vec<String>) -> Self {
        Self {
            teams: Teams::new(),
            matches: Matches::new(),
            skill_levels,
        }
    }

    pub fn has_skill_level(&self, skill: &str) -> bool {
        self.skill_levels.iter().any(|s| s == skill)
    }

    /// Looks a player up across every team
    pub fn player(&self, player_id: &str) -> Option<(&Team, &Player)> {
        self.teams
            .values()
            .find_map(|team| team.players.get(player_id).map(|player| (team, player)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub players: Players,
}

impl Team {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            players: Players::new(),
        }
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.players.contains_key(player_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub skill: String,
}

impl Player {
    pub fn new(name: &str, skill: &str) -> Self {
        Self {
            name: name.to_string(),
            skill: skill.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubMatchKind {
    Singles,
    Doubles,
}

impl SubMatchKind {
    /// Participants each side fields
    pub fn side_size(&self) -> usize {
        match self {
            SubMatchKind::Singles => 1,
            SubMatchKind::Doubles => 2,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SubMatchKind::Singles => "singles",
            SubMatchKind::Doubles => "doubles",
        }
    }
}

/// One singles or doubles contest inside a team match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubMatch {
    #[serde(rename = "type")]
    pub kind: SubMatchKind,
    pub team1_player_ids: Vec<PlayerId>,
    pub team2_player_ids: Vec<PlayerId>,
    /// Empty means the sub-match was drawn
    #[serde(default)]
    pub winner_player_ids: Vec<PlayerId>,
}

impl SubMatch {
    pub fn singles(team1_player: &str, team2_player: &str, winners: &[&str]) -> Self {
        Self {
            kind: SubMatchKind::Singles,
            team1_player_ids: vec![team1_player.to_string()],
            team2_player_ids: vec![team2_player.to_string()],
            winner_player_ids: winners.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn doubles(team1_players: [&str; 2], team2_players: [&str; 2], winners: &[&str]) -> Self {
        Self {
            kind: SubMatchKind::Doubles,
            team1_player_ids: team1_players.iter().map(|p| p.to_string()).collect(),
            team2_player_ids: team2_players.iter().map(|p| p.to_string()).collect(),
            winner_player_ids: winners.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn is_participant(&self, player_id: &str) -> bool {
        self.team1_player_ids.iter().any(|p| p == player_id)
            || self.team2_player_ids.iter().any(|p| p == player_id)
    }
}

/// A recorded team match with its derived tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub team1_name: String,
    pub team2_name: String,
    pub sub_matches: Vec<SubMatch>,
    pub timestamp: NaiveDateTime,
    pub winner_name: String,
    pub winner_id: Option<TeamId>,
    pub team1_sub_match_wins: u32,
    pub team2_sub_match_wins: u32,
}

impl Match {
    pub fn involves(&self, team_id: &str) -> bool {
        self.team1_id == team_id || self.team2_id == team_id
    }

    pub fn score(&self) -> String {
        format!("{}-{}", self.team1_sub_match_wins, self.team2_sub_match_wins)
    }
}
