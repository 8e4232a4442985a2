//! One-way push of the leaderboard snapshots to a remote document store.

mod rest;

use anyhow::{Context, Result};
use log::debug;
use serde_json::{json, Value};

use crate::domain::{PlayerPoints, TeamStanding};

pub use rest::RestMirror;

pub const TEAMS_DOCUMENT: &str = "leaderboard/teams";
pub const PLAYERS_DOCUMENT: &str = "leaderboard/players";

/// A remote target that stores whole JSON documents under a name
pub trait LeaderboardMirror {
    /// Overwrites the named document with `body`
    fn publish(&self, document: &str, body: &Value) -> Result<()>;
}

pub fn publish_leaderboards(
    mirror: &dyn LeaderboardMirror,
    standings: &[TeamStanding],
    players: &[PlayerPoints],
) -> Result<()> {
    mirror
        .publish(TEAMS_DOCUMENT, &json!({ "standings": standings }))
        .context("Failed to publish team standings")?;
    mirror
        .publish(PLAYERS_DOCUMENT, &json!({ "players": players }))
        .context("Failed to publish player leaderboard")?;

    debug!(
        "Mirrored {} standings and {} player rows",
        standings.len(),
        players.len()
    );
    Ok(())
}
