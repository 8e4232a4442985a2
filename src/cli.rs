use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::SubMatchKind;

#[derive(Parser, Debug)]
#[command(author, version, about = "club-tournament: team match tournament manager")]
pub struct Cli {
    /// Tournament document to use (overrides TOURNAMENT_DATA_FILE)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Manage teams
    Team {
        #[clap(subcommand)]
        action: TeamCommand,
    },
    /// Manage the players of a team
    Player {
        #[clap(subcommand)]
        action: PlayerCommand,
    },
    /// Manage skill levels
    Skill {
        #[clap(subcommand)]
        action: SkillCommand,
    },
    /// Record, edit and inspect matches
    Match {
        #[clap(subcommand)]
        action: MatchCommand,
    },
    /// Show match history, newest first
    History {
        /// Only matches of this team (name or id)
        #[arg(short, long)]
        team: Option<String>,
    },
    /// Show team standings
    Standings,
    /// Show the player leaderboard
    Leaderboard {
        /// Only players of this skill level
        #[arg(short, long)]
        skill: Option<String>,
    },
    /// Write the whole tournament document to a file
    Export { path: PathBuf },
    /// Replace all tournament data with a previously exported document
    Import { path: PathBuf },
    /// Delete every team, player and match
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Start the read-only leaderboard server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print shell completions
    Completions { shell: Shell },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TeamCommand {
    Add {
        name: String,
    },
    Rename {
        team: String,
        new_name: String,
    },
    /// Delete a team together with its players and matches
    Remove {
        team: String,
        /// Confirm the removal
        #[arg(long)]
        yes: bool,
    },
    List,
    /// Show roster and match history of one team
    Show {
        team: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Add {
        team: String,
        name: String,
        #[arg(short, long)]
        skill: String,
    },
    /// Rename a player or change their skill level
    Update {
        team: String,
        player: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        skill: Option<String>,
    },
    /// Remove a player from a team roster
    Remove {
        team: String,
        player: String,
        /// Confirm the removal
        #[arg(long)]
        yes: bool,
    },
    List {
        team: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SkillCommand {
    Add { name: String },
    /// Remove a skill level no player uses
    Remove { name: String },
    List,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum MatchCommand {
    /// Record a match between two teams
    Record {
        team1: String,
        team2: String,
        #[clap(flatten)]
        games: SubMatchArgs,
    },
    /// Replace the sub-matches of a recorded match
    Edit {
        id: String,
        #[clap(flatten)]
        games: SubMatchArgs,
    },
    Remove {
        id: String,
    },
    Show {
        id: String,
    },
    /// Show the match played on a date ("YYYY-MM-DD HH:MM") between two teams
    Find {
        date: String,
        team1: String,
        team2: String,
    },
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct SubMatchArgs {
    /// Singles game as "<player1>,<player2>,<winner>" where winner is 1, 2 or draw
    #[arg(long = "singles", value_parser = parse_singles)]
    pub singles: Vec<SubMatchArg>,

    /// Doubles game as "<p1>+<p2>,<p3>+<p4>,<winner>" where winner is 1, 2 or draw
    #[arg(long = "doubles", value_parser = parse_doubles)]
    pub doubles: Vec<SubMatchArg>,
}

impl SubMatchArgs {
    /// Singles first, then doubles, each in the order given
    pub fn all(&self) -> impl Iterator<Item = &SubMatchArg> {
        self.singles.iter().chain(self.doubles.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideWinner {
    Side1,
    Side2,
    Draw,
}

impl FromStr for SideWinner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" => Ok(Self::Side1),
            "2" => Ok(Self::Side2),
            "draw" | "d" | "0" => Ok(Self::Draw),
            other => Err(format!("winner must be 1, 2 or draw, got '{other}'")),
        }
    }
}

/// A sub-match as typed on the command line, players still unresolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubMatchArg {
    pub kind: SubMatchKind,
    pub side1: Vec<String>,
    pub side2: Vec<String>,
    pub winner: SideWinner,
}

impl SubMatchArg {
    pub fn parse(kind: SubMatchKind, raw: &str) -> Result<Self, String> {
        let parts: Vec<&str> = raw.split(',').collect();
        let [side1, side2, winner] = parts.as_slice() else {
            return Err(format!(
                "expected '<side1>,<side2>,<winner>' for {}, got '{raw}'",
                kind.as_str()
            ));
        };

        Ok(Self {
            kind,
            side1: parse_side(kind, side1)?,
            side2: parse_side(kind, side2)?,
            winner: winner.parse()?,
        })
    }
}

fn parse_side(kind: SubMatchKind, raw: &str) -> Result<Vec<String>, String> {
    let names: Vec<String> = raw.split('+').map(|n| n.trim().to_string()).collect();
    if names.iter().any(String::is_empty) {
        return Err(format!("empty player name in '{raw}'"));
    }
    if names.len() != kind.side_size() {
        return Err(format!(
            "{} needs {} player(s) per side, got '{raw}'",
            kind.as_str(),
            kind.side_size()
        ));
    }
    Ok(names)
}

fn parse_singles(raw: &str) -> Result<SubMatchArg, String> {
    SubMatchArg::parse(SubMatchKind::Singles, raw)
}

fn parse_doubles(raw: &str) -> Result<SubMatchArg, String> {
    SubMatchArg::parse(SubMatchKind::Doubles, raw)
}
