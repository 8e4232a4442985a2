use std::path::PathBuf;

use crate::domain::default_skill_levels;

pub const DATA_FILE_ENV: &str = "TOURNAMENT_DATA_FILE";
pub const MIRROR_URL_ENV: &str = "LEADERBOARD_MIRROR_URL";

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub data_file: PathBuf,
    pub default_skill_levels: Vec<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let data_file =
            std::env::var(DATA_FILE_ENV).unwrap_or_else(|_| "tournament_data.json".to_string());
        Self {
            data_file: PathBuf::from(data_file),
            default_skill_levels: default_skill_levels(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MirrorSettings {
    /// Mirroring is off when no base URL is configured
    pub base_url: Option<String>,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            base_url: std::env::var(MIRROR_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty()),
            user_agent: "ClubTournament/1.0",
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub mirror: MirrorSettings,
    pub server: ServerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            storage: StorageSettings::default(),
            mirror: MirrorSettings::default(),
            server: ServerSettings::default(),
        }
    }

    /// Points the storage at another document, as the `--data-file` flag does
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.storage.data_file = path;
        }
        self
    }
}
