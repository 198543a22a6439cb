use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

use crate::{
    error::ClientError,
    services::transport::{DEFAULT_ACCEPT, DEFAULT_TIMEOUT},
    validation,
};

pub const DEFAULT_CONFIG_FILE: &str = "tourism.yml";

/// Connection settings for one hypermedia endpoint
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ClientSettings {
    pub home_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_accept")]
    pub accept: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_accept() -> String {
    DEFAULT_ACCEPT.to_string()
}

impl ClientSettings {
    pub fn new(home_uri: &str) -> Self {
        Self {
            home_uri: home_uri.to_string(),
            version: None,
            timeout_secs: default_timeout_secs(),
            accept: default_accept(),
        }
    }

    /// Load settings from a YAML file, or JSON when the extension is `.json`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read settings file {}", path.display()))?;

        let settings: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).context("Invalid JSON settings")?
        } else {
            serde_yaml::from_str(&content).context("Invalid YAML settings")?
        };

        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> std::result::Result<(), ClientError> {
        validation::validate_home_uri(&self.home_uri).map(|_| ())
    }
}
