use log::debug;

use crate::domain::{Match, Matches, TeamStanding, Teams};

/// Aggregates win/loss/draw counts for every team over the match history
pub fn calculate_standings(teams: &Teams, matches: &Matches) -> Vec<TeamStanding> {
    debug!("Calculating standings for {} teams over {} matches", teams.len(), matches.len());

    let mut standings = initial_standings(teams);
    for record in matches.values() {
        apply_match(&mut standings, record);
    }

    sort_by_wins(&mut standings);
    standings
}

fn initial_standings(teams: &Teams) -> Vec<TeamStanding> {
    teams
        .iter()
        .map(|(id, team)| TeamStanding::new(id, &team.name))
        .collect()
}

fn apply_match(standings: &mut [TeamStanding], record: &Match) {
    let team1 = position_of(standings, &record.team1_id);
    let team2 = position_of(standings, &record.team2_id);

    for idx in [team1, team2].into_iter().flatten() {
        standings[idx].matches_played += 1;
    }

    match record.winner_id.as_deref() {
        Some(winner) if winner == record.team1_id => credit_win(standings, team1, team2),
        Some(winner) if winner == record.team2_id => credit_win(standings, team2, team1),
        Some(_) => {}
        None => {
            if let (Some(t1), Some(t2)) = (team1, team2) {
                standings[t1].draws += 1;
                standings[t2].draws += 1;
            }
        }
    }
}

fn credit_win(standings: &mut [TeamStanding], winner: Option<usize>, loser: Option<usize>) {
    // A win only counts while the winning team still exists.
    let Some(winner) = winner else {
        return;
    };
    standings[winner].wins += 1;
    if let Some(loser) = loser {
        standings[loser].losses += 1;
    }
}

fn position_of(standings: &[TeamStanding], team_id: &str) -> Option<usize> {
    standings.iter().position(|s| s.team_id == team_id)
}

fn sort_by_wins(standings: &mut [TeamStanding]) {
    // sort_by is stable, ties keep team insertion order
    standings.sort_by(|a, b| b.wins.cmp(&a.wins));
}
