pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod mirror;
pub mod scoring;
pub mod services;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::config::settings::AppConfig;
use crate::services::console::ConsoleService;
use crate::services::server::ServerService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_serve(port: Option<u16>, data_file: Option<PathBuf>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new().with_data_file(data_file);
        let port = port.unwrap_or(config.server.port);
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

pub fn handle_console(command: &Command, data_file: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::new().with_data_file(data_file);
    let mut service = ConsoleService::open(&config)?;
    let output = service.execute(command)?;
    print!("{output}");
    Ok(())
}
