use anyhow::{bail, Context, Result};
use colored::Colorize;
use log::{info, warn};
use std::fmt::Write;

use crate::cli::{
    Command, MatchCommand, PlayerCommand, SideWinner, SkillCommand, SubMatchArg, SubMatchArgs,
    TeamCommand,
};
use crate::config::settings::AppConfig;
use crate::domain::{
    Match, MatchSummary, PlayerPoints, SubMatch, TeamMatchSummary, TeamStanding,
};
use crate::mirror::RestMirror;
use crate::store::{DocumentFile, TournamentStore};

/// Runs management commands against one tournament document
pub struct ConsoleService {
    store: TournamentStore,
}

impl ConsoleService {
    pub fn new(store: TournamentStore) -> Self {
        Self { store }
    }

    /// Opens the configured document and attaches the mirror when one is set up
    pub fn open(config: &AppConfig) -> Result<Self> {
        let file = DocumentFile::new(&config.storage.data_file);
        let mut store = TournamentStore::open(file, config.storage.default_skill_levels.clone())
            .with_context(|| {
                format!(
                    "Failed to open tournament data at {}",
                    config.storage.data_file.display()
                )
            })?;
        info!("Using tournament data at {}", store.path().display());

        if store.was_recovered() {
            warn!("Started with a fresh tournament document");
            eprintln!(
                "{}",
                "Warning: the tournament data file was corrupt and has been reset.".yellow()
            );
        }

        if let Some(mirror) = RestMirror::from_settings(&config.mirror)? {
            info!("Mirroring leaderboards to {}", mirror.base_url());
            store = store.with_mirror(Box::new(mirror));
        }

        Ok(Self::new(store))
    }

    pub fn store(&self) -> &TournamentStore {
        &self.store
    }

    /// Executes `command` and returns the text to show the user
    pub fn execute(&mut self, command: &Command) -> Result<String> {
        match command {
            Command::Team { action } => self.team(action),
            Command::Player { action } => self.player(action),
            Command::Skill { action } => self.skill(action),
            Command::Match { action } => self.match_command(action),
            Command::History { team: None } => Ok(render_history(&self.store.match_history())),
            Command::History { team: Some(team) } => {
                let (team_id, team) = self.store.find_team(team)?;
                let rows = self.store.team_match_history(team_id)?;
                Ok(render_team_history(&team.name, &rows))
            }
            Command::Standings => Ok(render_standings(&self.store.standings())),
            Command::Leaderboard { skill } => Ok(render_leaderboard(
                &self.store.player_points(skill.as_deref()),
            )),
            Command::Export { path } => {
                self.store.export(path)?;
                Ok(success(&format!("Data exported to {}", path.display())))
            }
            Command::Import { path } => {
                self.store.import(path)?;
                Ok(success(&format!("Data imported from {}", path.display())))
            }
            Command::Reset { yes: false } => {
                bail!("Reset deletes all teams, players and matches; pass --yes to confirm")
            }
            Command::Reset { yes: true } => {
                self.store.reset()?;
                Ok(success("All tournament data has been reset."))
            }
            Command::Serve { .. } | Command::Completions { .. } => {
                bail!("{command:?} is not a console command")
            }
        }
    }

    fn team(&mut self, action: &TeamCommand) -> Result<String> {
        match action {
            TeamCommand::Add { name } => {
                let id = self.store.create_team(name)?;
                Ok(success(&format!("Team '{}' created ({id})", name.trim())))
            }
            TeamCommand::Rename { team, new_name } => {
                let id = self.store.find_team(team)?.0.clone();
                self.store.rename_team(&id, new_name)?;
                Ok(success(&format!("Team renamed to '{}'", new_name.trim())))
            }
            TeamCommand::Remove { team, yes } => {
                let (id, team) = self.store.find_team(team)?;
                let (id, name) = (id.clone(), team.name.clone());
                if !yes {
                    bail!("Removing '{name}' also deletes its players and matches; pass --yes to confirm");
                }
                self.store.delete_team(&id)?;
                Ok(success(&format!("Team '{name}' and its matches deleted")))
            }
            TeamCommand::List => {
                let mut out = String::new();
                for (id, team) in self.store.teams() {
                    let _ = writeln!(
                        out,
                        "{:<24} {:>3} players  {}",
                        team.name.bold(),
                        team.players.len(),
                        id.dimmed()
                    );
                }
                Ok(or_placeholder(out, "No teams yet."))
            }
            TeamCommand::Show { team } => {
                let (team_id, team) = self.store.find_team(team)?;
                let mut out = format!("{} ({})\n", team.name.bold(), team_id.dimmed());
                for player in team.players.values() {
                    let _ = writeln!(out, "  {:<24} {}", player.name, player.skill);
                }
                out.push('\n');
                out.push_str(&render_team_history(
                    &team.name,
                    &self.store.team_match_history(team_id)?,
                ));
                Ok(out)
            }
        }
    }

    fn player(&mut self, action: &PlayerCommand) -> Result<String> {
        match action {
            PlayerCommand::Add { team, name, skill } => {
                let team_id = self.store.find_team(team)?.0.clone();
                self.store.add_player(&team_id, name, skill)?;
                Ok(success(&format!("Player '{}' added", name.trim())))
            }
            PlayerCommand::Update {
                team,
                player,
                name,
                skill,
            } => {
                let team_id = self.store.find_team(team)?.0.clone();
                let (player_id, current) = self.store.find_player(&team_id, player)?;
                let player_id = player_id.clone();
                let new_name = name.clone().unwrap_or_else(|| current.name.clone());
                let new_skill = skill.clone().unwrap_or_else(|| current.skill.clone());
                self.store
                    .update_player(&team_id, &player_id, &new_name, &new_skill)?;
                Ok(success(&format!("Player '{}' updated", new_name.trim())))
            }
            PlayerCommand::Remove { team, player, yes } => {
                let team_id = self.store.find_team(team)?.0.clone();
                let (player_id, current) = self.store.find_player(&team_id, player)?;
                let (player_id, name) = (player_id.clone(), current.name.clone());
                if !yes {
                    bail!("Removing '{name}' drops them from the leaderboard; pass --yes to confirm");
                }
                self.store.remove_player(&team_id, &player_id)?;
                Ok(success(&format!("Player '{name}' removed")))
            }
            PlayerCommand::List { team } => {
                let team_id = self.store.find_team(team)?.0.clone();
                let mut out = String::new();
                for (player_id, player) in self.store.players(&team_id)? {
                    let _ = writeln!(
                        out,
                        "{:<24} {:<14} {}",
                        player.name,
                        player.skill,
                        player_id.dimmed()
                    );
                }
                Ok(or_placeholder(out, "No players in this team."))
            }
        }
    }

    fn skill(&mut self, action: &SkillCommand) -> Result<String> {
        match action {
            SkillCommand::Add { name } => {
                self.store.add_skill_level(name)?;
                Ok(success(&format!("Skill level '{}' added", name.trim())))
            }
            SkillCommand::Remove { name } => {
                self.store.remove_skill_level(name)?;
                Ok(success(&format!("Skill level '{name}' removed")))
            }
            SkillCommand::List => Ok(self
                .store
                .skill_levels()
                .iter()
                .map(|s| format!("{s}\n"))
                .collect()),
        }
    }

    fn match_command(&mut self, action: &MatchCommand) -> Result<String> {
        match action {
            MatchCommand::Record {
                team1,
                team2,
                games,
            } => {
                let team1_id = self.store.find_team(team1)?.0.clone();
                let team2_id = self.store.find_team(team2)?.0.clone();
                let sub_matches = self.resolve_sub_matches(&team1_id, &team2_id, games)?;
                let id = self.store.record_match(&team1_id, &team2_id, sub_matches)?;
                self.show_match(&id)
            }
            MatchCommand::Edit { id, games } => {
                let id = self.resolve_match_id(id)?;
                let record = self.store.match_record(&id)?;
                let (team1_id, team2_id) = (record.team1_id.clone(), record.team2_id.clone());
                let sub_matches = self.resolve_sub_matches(&team1_id, &team2_id, games)?;
                self.store.update_match(&id, sub_matches)?;
                self.show_match(&id)
            }
            MatchCommand::Remove { id } => {
                let id = self.resolve_match_id(id)?;
                self.store.delete_match(&id)?;
                Ok(success("Match deleted"))
            }
            MatchCommand::Show { id } => {
                let id = self.resolve_match_id(id)?;
                self.show_match(&id)
            }
            MatchCommand::Find { date, team1, team2 } => {
                let id = self
                    .store
                    .find_match_id(date, team1, team2)
                    .with_context(|| format!("No match between {team1} and {team2} on {date}"))?;
                self.show_match(&id)
            }
        }
    }

    fn show_match(&self, id: &str) -> Result<String> {
        let record = self.store.match_record(id)?;
        Ok(render_match(&self.store, id, record))
    }

    /// Accepts a match id or `latest`
    fn resolve_match_id(&self, id: &str) -> Result<String> {
        if id.eq_ignore_ascii_case("latest") {
            return self
                .store
                .latest_match()
                .map(|m| m.id)
                .context("No matches recorded yet");
        }
        Ok(id.to_string())
    }

    fn resolve_sub_matches(
        &self,
        team1_id: &str,
        team2_id: &str,
        games: &SubMatchArgs,
    ) -> Result<Vec<SubMatch>> {
        games
            .all()
            .enumerate()
            .map(|(i, game)| {
                self.resolve_sub_match(team1_id, team2_id, game)
                    .with_context(|| format!("Sub-match {}", i + 1))
            })
            .collect()
    }

    fn resolve_sub_match(
        &self,
        team1_id: &str,
        team2_id: &str,
        game: &SubMatchArg,
    ) -> Result<SubMatch> {
        let side1 = self.resolve_side(team1_id, &game.side1)?;
        let side2 = self.resolve_side(team2_id, &game.side2)?;
        let winners = match game.winner {
            SideWinner::Side1 => side1.clone(),
            SideWinner::Side2 => side2.clone(),
            SideWinner::Draw => Vec::new(),
        };

        Ok(SubMatch {
            kind: game.kind,
            team1_player_ids: side1,
            team2_player_ids: side2,
            winner_player_ids: winners,
        })
    }

    fn resolve_side(&self, team_id: &str, names: &[String]) -> Result<Vec<String>> {
        names
            .iter()
            .map(|name| Ok(self.store.find_player(team_id, name)?.0.clone()))
            .collect()
    }
}

fn success(message: &str) -> String {
    format!("{}\n", message.green())
}

fn or_placeholder(out: String, placeholder: &str) -> String {
    if out.is_empty() {
        format!("{}\n", placeholder.dimmed())
    } else {
        out
    }
}

fn render_standings(rows: &[TeamStanding]) -> String {
    let mut out = format!(
        "{:<4} {:<24} {:>4} {:>4} {:>4} {:>4}\n",
        "#", "Team", "W", "L", "D", "P"
    );
    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<24} {:>4} {:>4} {:>4} {:>4}",
            i + 1,
            row.name,
            row.wins,
            row.losses,
            row.draws,
            row.matches_played
        );
    }
    out
}

fn render_leaderboard(rows: &[PlayerPoints]) -> String {
    let mut out = format!(
        "{:<4} {:<24} {:<24} {:<14} {:>6}\n",
        "#", "Player", "Team", "Skill", "Points"
    );
    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<24} {:<24} {:<14} {:>6}",
            i + 1,
            row.name,
            row.team_name,
            row.skill,
            row.points
        );
    }
    out
}

fn render_history(rows: &[MatchSummary]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{}  {} {} {}  winner: {}  {}",
            row.date,
            row.team1_name,
            row.score.bold(),
            row.team2_name,
            row.winner_name,
            row.id.dimmed()
        );
    }
    or_placeholder(out, "No matches recorded yet.")
}

fn render_team_history(team_name: &str, rows: &[TeamMatchSummary]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{}  vs {}  {}  winner: {}  {}",
            row.date,
            row.opponent,
            row.score.bold(),
            row.winner_name,
            row.id.dimmed()
        );
    }
    or_placeholder(out, &format!("{team_name} has not played yet."))
}

fn render_match(store: &TournamentStore, id: &str, record: &Match) -> String {
    let mut out = format!(
        "{} {} {}  ({})\n",
        record.team1_name.bold(),
        record.score(),
        record.team2_name.bold(),
        record.timestamp.format(crate::store::DATE_FORMAT)
    );
    for (i, game) in record.sub_matches.iter().enumerate() {
        let winners = if game.winner_player_ids.is_empty() {
            "draw".to_string()
        } else {
            player_names(store, &game.winner_player_ids)
        };
        let _ = writeln!(
            out,
            "  {}. {:<8} {} vs {}  winner: {}",
            i + 1,
            game.kind.as_str(),
            player_names(store, &game.team1_player_ids),
            player_names(store, &game.team2_player_ids),
            winners
        );
    }
    let _ = writeln!(out, "Winner: {}  {}", record.winner_name.green(), id.dimmed());
    out
}

fn player_names(store: &TournamentStore, ids: &[String]) -> String {
    ids.iter()
        .map(|id| store.player_name(id))
        .collect::<Vec<_>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::domain::default_skill_levels;
    use clap::Parser;

    fn console(dir: &tempfile::TempDir) -> ConsoleService {
        let file = DocumentFile::new(dir.path().join("tournament_data.json"));
        ConsoleService::new(TournamentStore::open(file, default_skill_levels()).unwrap())
    }

    fn run(console: &mut ConsoleService, args: &[&str]) -> Result<String> {
        let mut argv = vec!["club_tournament"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        console.execute(&cli.command)
    }

    fn seed(console: &mut ConsoleService) {
        run(console, &["team", "add", "Falcons"]).unwrap();
        run(console, &["team", "add", "Owls"]).unwrap();
        for (team, player) in [("Falcons", "Ann"), ("Falcons", "Cy"), ("Owls", "Bo"), ("Owls", "Di")] {
            run(console, &["player", "add", team, player, "--skill", "Advanced"]).unwrap();
        }
    }

    #[test]
    fn test_record_match_by_player_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = console(&dir);
        seed(&mut console);

        let out = run(
            &mut console,
            &[
                "match", "record", "falcons", "Owls",
                "--singles", "Ann,Bo,1",
                "--singles", "Cy,Di,draw",
                "--doubles", "Ann+Cy,Bo+Di,1",
            ],
        )
        .unwrap();

        assert!(out.contains("Falcons"));
        let record = &console.store().matches()[0];
        assert_eq!(record.score(), "2-0");
        assert_eq!(record.sub_matches.len(), 3);
        assert!(record.sub_matches[1].winner_player_ids.is_empty());
        let standings = console.store().standings();
        assert_eq!(standings[0].name, "Falcons");
        assert_eq!(standings[0].wins, 1);
    }

    #[test]
    fn test_unknown_player_names_the_sub_match() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = console(&dir);
        seed(&mut console);

        let err = run(
            &mut console,
            &["match", "record", "Falcons", "Owls", "--singles", "Ann,Zed,2"],
        )
        .unwrap_err();

        assert!(format!("{err:#}").contains("Sub-match 1"));
        assert!(console.store().matches().is_empty());
    }

    #[test]
    fn test_edit_latest_match() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = console(&dir);
        seed(&mut console);
        run(&mut console, &["match", "record", "Falcons", "Owls", "--singles", "Ann,Bo,1"]).unwrap();

        run(&mut console, &["match", "edit", "latest", "--singles", "Ann,Bo,2"]).unwrap();

        let record = &console.store().matches()[0];
        assert_eq!(record.winner_name, "Owls");
    }

    #[test]
    fn test_player_update_keeps_unset_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = console(&dir);
        seed(&mut console);

        run(&mut console, &["player", "update", "Falcons", "ann", "--skill", "Expert"]).unwrap();

        let team_id = console.store().find_team("Falcons").unwrap().0.clone();
        let (_, ann) = console.store().find_player(&team_id, "Ann").unwrap();
        assert_eq!(ann.name, "Ann");
        assert_eq!(ann.skill, "Expert");
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = console(&dir);
        seed(&mut console);

        assert!(run(&mut console, &["reset"]).is_err());
        assert_eq!(console.store().teams().len(), 2);

        run(&mut console, &["reset", "--yes"]).unwrap();
        assert!(console.store().teams().is_empty());
    }

    #[test]
    fn test_leaderboard_lists_players() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = console(&dir);
        seed(&mut console);
        run(&mut console, &["match", "record", "Falcons", "Owls", "--singles", "Cy,Bo,1"]).unwrap();

        let out = run(&mut console, &["leaderboard", "--skill", "Advanced"]).unwrap();

        let first_row = out.lines().nth(1).unwrap();
        assert!(first_row.contains("Cy"));
        assert!(first_row.trim_end().ends_with('1'));
    }

    #[test]
    fn test_team_remove_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = console(&dir);
        seed(&mut console);
        run(&mut console, &["match", "record", "Falcons", "Owls", "--singles", "Ann,Bo,1"]).unwrap();

        let err = run(&mut console, &["team", "remove", "Falcons"]).unwrap_err();

        assert!(err.to_string().contains("--yes"));
        assert_eq!(console.store().teams().len(), 2);
        assert_eq!(console.store().matches().len(), 1);

        run(&mut console, &["team", "remove", "Falcons", "--yes"]).unwrap();
        assert_eq!(console.store().teams().len(), 1);
        assert!(console.store().matches().is_empty());
    }

    #[test]
    fn test_player_remove_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = console(&dir);
        seed(&mut console);

        assert!(run(&mut console, &["player", "remove", "Owls", "Bo"]).is_err());
        let team_id = console.store().find_team("Owls").unwrap().0.clone();
        assert_eq!(console.store().players(&team_id).unwrap().len(), 2);

        let out = run(&mut console, &["player", "remove", "Owls", "bo", "--yes"]).unwrap();
        assert!(out.contains("Bo"));
        assert_eq!(console.store().players(&team_id).unwrap().len(), 1);
    }

    #[test]
    fn test_find_match_by_date_and_current_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = console(&dir);
        seed(&mut console);
        run(&mut console, &["match", "record", "Falcons", "Owls", "--singles", "Ann,Bo,1"]).unwrap();
        run(&mut console, &["team", "rename", "Owls", "Night Owls"]).unwrap();
        let (id, record) = console.store().matches().get_index(0).unwrap();
        let (id, date) = (id.clone(), record.timestamp.format(crate::store::DATE_FORMAT).to_string());

        let out = run(&mut console, &["match", "find", &date, "night owls", "Falcons"]).unwrap();

        assert!(out.contains(&id));
        assert!(run(&mut console, &["match", "find", &date, "Owls", "Falcons"]).is_err());
    }
}
