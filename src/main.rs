use anyhow::Result;
use colored::Colorize;

use club_tournament::cli::{Cli, Command};
use club_tournament::{handle_completions, handle_console, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Error:".red());
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { port } => handle_serve(port, cli.data_file),
        Command::Completions { shell } => handle_completions(shell),
        command => handle_console(&command, cli.data_file),
    }
}
