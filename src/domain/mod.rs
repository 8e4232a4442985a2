pub mod models;
mod views;

pub use models::*;
pub use views::{MatchSummary, PlayerPoints, TeamMatchSummary, TeamStanding};
