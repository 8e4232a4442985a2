use log::debug;

use crate::domain::{Matches, PlayerPoints, Teams};

/// One point per sub-match won, for every player on every team
pub fn calculate_player_points(teams: &Teams, matches: &Matches) -> Vec<PlayerPoints> {
    debug!("Calculating player points over {} matches", matches.len());

    let mut rows = initial_rows(teams);
    for winner_id in winning_player_ids(matches) {
        if let Some(row) = rows.iter_mut().find(|r| r.player_id == winner_id) {
            row.points += 1;
        }
    }

    rows.sort_by(|a, b| b.points.cmp(&a.points));
    rows
}

/// Keeps only players at the given skill level, preserving rank order
pub fn filter_by_skill(rows: Vec<PlayerPoints>, skill: &str) -> Vec<PlayerPoints> {
    rows.into_iter().filter(|r| r.skill == skill).collect()
}

fn initial_rows(teams: &Teams) -> Vec<PlayerPoints> {
    teams
        .values()
        .flat_map(|team| {
            team.players.iter().map(move |(player_id, player)| PlayerPoints {
                player_id: player_id.clone(),
                name: player.name.clone(),
                team_name: team.name.clone(),
                skill: player.skill.clone(),
                points: 0,
            })
        })
        .collect()
}

fn winning_player_ids(matches: &Matches) -> impl Iterator<Item = &str> {
    matches
        .values()
        .flat_map(|m| m.sub_matches.iter())
        .flat_map(|s| s.winner_player_ids.iter())
        .map(String::as_str)
}
