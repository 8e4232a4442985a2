use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde::Deserialize;

use crate::config::settings::AppConfig;
use crate::store::{DocumentFile, ErrorKind, StoreError, TournamentStore};

pub mod leaderboard;
pub mod matches;

pub struct AppState {
    pub file: DocumentFile,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            file: DocumentFile::new(&config.storage.data_file),
            config,
        }
    }

    /// Fresh read of the document so changes made by the CLI show up
    pub fn load_store(&self) -> Result<TournamentStore, Response> {
        TournamentStore::snapshot(
            self.file.clone(),
            self.config.storage.default_skill_levels.clone(),
        )
        .map_err(error_response)
    }
}

#[derive(Deserialize)]
pub struct LeaderboardParams {
    pub skill: Option<String>,
}

pub fn error_response(err: StoreError) -> Response {
    match err.kind() {
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, err.to_string()).into_response(),
        _ => {
            error!("Failed to read tournament data: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Query Error: {err}"),
            )
                .into_response()
        }
    }
}
