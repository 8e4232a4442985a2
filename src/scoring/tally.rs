use super::types::{MatchTally, SubMatchOutcome};
use crate::domain::{SubMatch, Team};

/// Classifies a sub-match by which roster its winners come from
pub fn classify_sub_match(sub_match: &SubMatch, team1: &Team, team2: &Team) -> SubMatchOutcome {
    if sub_match.winner_player_ids.is_empty() {
        return SubMatchOutcome::Draw;
    }

    let team1_in_winners = sub_match
        .winner_player_ids
        .iter()
        .any(|id| team1.has_player(id));
    let team2_in_winners = sub_match
        .winner_player_ids
        .iter()
        .any(|id| team2.has_player(id));

    match (team1_in_winners, team2_in_winners) {
        (true, false) => SubMatchOutcome::Team1,
        (false, true) => SubMatchOutcome::Team2,
        _ => SubMatchOutcome::Ambiguous,
    }
}

/// Counts sub-match wins per side
pub fn tally_sub_matches(sub_matches: &[SubMatch], team1: &Team, team2: &Team) -> MatchTally {
    let mut tally = MatchTally {
        team1_wins: 0,
        team2_wins: 0,
    };

    for sub_match in sub_matches {
        match classify_sub_match(sub_match, team1, team2) {
            SubMatchOutcome::Team1 => tally.team1_wins += 1,
            SubMatchOutcome::Team2 => tally.team2_wins += 1,
            SubMatchOutcome::Draw | SubMatchOutcome::Ambiguous => {}
        }
    }

    tally
}
