use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use shared::DEFAULT_TRANSCRIBE_ENDPOINT;
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "voice_scribe.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub endpoint: String,
    /// No timeout unless set; a hung request then stays in flight.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TRANSCRIBE_ENDPOINT.into(),
            timeout_secs: None,
        }
    }
}

impl ClientSettings {
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        parse_endpoint(&self.endpoint)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Defaults, then the config file, then environment variables.
///
/// An explicit `config_path` must exist. Without one, `voice_scribe.toml` in
/// the working directory is used when present.
pub fn load_settings(config_path: Option<&Path>) -> Result<ClientSettings, ConfigError> {
    let settings = match config_path {
        Some(path) => read_settings_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_settings_file(default_path)?
            } else {
                ClientSettings::default()
            }
        }
    };

    Ok(apply_env_overrides(settings, |name| std::env::var(name).ok()))
}

fn read_settings_file(path: &Path) -> Result<ClientSettings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn apply_env_overrides(
    mut settings: ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(v) = non_empty("VOICE_SCRIBE_ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = non_empty("APP__ENDPOINT") {
        settings.endpoint = v;
    }

    if let Some(v) = non_empty("APP__TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.timeout_secs = Some(parsed),
            Err(err) => tracing::warn!(value = %v, %err, "ignoring invalid APP__TIMEOUT_SECS"),
        }
    }

    settings
}

pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidEndpoint {
        endpoint: raw.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEndpoint {
            endpoint: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
