/// How a single sub-match counts toward the team match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubMatchOutcome {
    Draw,
    Team1,
    Team2,
    /// Winners from both rosters, or from neither. Scores for nobody.
    Ambiguous,
}

/// Side of a team match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSide {
    Team1,
    Team2,
}

/// Sub-match wins per side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchTally {
    pub team1_wins: u32,
    pub team2_wins: u32,
}

impl MatchTally {
    /// The side with strictly more sub-match wins; `None` is a draw
    pub fn winner(&self) -> Option<MatchSide> {
        match self.team1_wins.cmp(&self.team2_wins) {
            std::cmp::Ordering::Greater => Some(MatchSide::Team1),
            std::cmp::Ordering::Less => Some(MatchSide::Team2),
            std::cmp::Ordering::Equal => None,
        }
    }
}
