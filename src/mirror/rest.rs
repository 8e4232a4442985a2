use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

use super::LeaderboardMirror;
use crate::config::settings::MirrorSettings;

/// Mirror that PUTs each snapshot to `<base_url>/<document>`
pub struct RestMirror {
    client: Client,
    base_url: String,
}

impl RestMirror {
    pub fn new(base_url: &str, user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds a mirror when a base URL is configured
    pub fn from_settings(settings: &MirrorSettings) -> Result<Option<Self>> {
        settings
            .base_url
            .as_deref()
            .map(|url| Self::new(url, settings.user_agent, settings.timeout_secs))
            .transpose()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn document_url(&self, document: &str) -> String {
        format!("{}/{}", self.base_url, document)
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }
}

impl LeaderboardMirror for RestMirror {
    fn publish(&self, document: &str, body: &Value) -> Result<()> {
        let url = self.document_url(document);
        self.client
            .put(&url)
            .json(body)
            .send()
            .with_context(|| format!("Failed to send PUT request to {url}"))?
            .error_for_status()
            .with_context(|| format!("Mirror rejected {document}"))?;
        Ok(())
    }
}
