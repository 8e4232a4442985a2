pub mod points;
pub mod standings;
pub mod tally;
pub mod types;

pub use points::{calculate_player_points, filter_by_skill};
pub use standings::calculate_standings;
pub use tally::{classify_sub_match, tally_sub_matches};
pub use types::{MatchSide, MatchTally, SubMatchOutcome};
