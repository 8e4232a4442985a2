use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingItem {
    pub rank: usize,
    pub team_id: String,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub matches_played: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerItem {
    pub rank: usize,
    pub player_id: String,
    pub name: String,
    pub team_name: String,
    pub skill: String,
    pub points: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchItem {
    pub id: String,
    pub date: String,
    pub team1_name: String,
    pub score: String,
    pub team2_name: String,
    pub winner_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMatchItem {
    pub id: String,
    pub date: String,
    pub opponent: String,
    pub score: String,
    pub winner_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    pub id: String,
    pub date: String,
    pub team1_id: String,
    pub team1_name: String,
    pub team2_id: String,
    pub team2_name: String,
    pub score: String,
    pub winner_name: String,
    pub sub_matches: Vec<SubMatchDetail>,
}

/// Sub-match with player names resolved
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubMatchDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub team1_players: Vec<String>,
    pub team2_players: Vec<String>,
    pub winners: Vec<String>,
}
