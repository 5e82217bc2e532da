//! Sync configuration.

use std::path::PathBuf;
use std::time::Duration;

use modelsync_core::{Blocklist, LocalProvider, ModelTemplate};
use thiserror::Error;

/// Directory holding `openclaw.json`.
pub const CONFIG_DIR_ENV: &str = "OPENCLAW_CONFIG_DIR";

/// Runtime API base URL.
pub const OLLAMA_API_URL_ENV: &str = "OLLAMA_API_URL";

pub const CONFIG_FILE_NAME: &str = "openclaw.json";

pub const DEFAULT_OLLAMA_API_URL: &str = "http://127.0.0.1:11434";

/// Errors resolving the configuration before a sync starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot locate openclaw.json: set OPENCLAW_CONFIG_DIR or HOME, or pass --config")]
    NoConfigLocation,
}

/// Sync configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gateway configuration file to rewrite. Relative `openclaw.json` by
    /// default; the CLI sets it from `--config` or [`default_config_path`].
    pub config_path: PathBuf,

    /// Runtime API base URL for capability lookups.
    pub ollama_api_url: String,

    /// Local provider section settings.
    pub provider: LocalProvider,

    /// Template for generated provider entries.
    pub template: ModelTemplate,

    /// Models excluded despite reporting tool support.
    pub blocklist: Blocklist,

    /// Remote catalog provider namespace, `None` to skip the remote catalog.
    pub remote_provider: Option<String>,

    /// Timeout for the runtime CLI listing (seconds).
    pub list_timeout_secs: u64,

    /// Timeout for each capability lookup (seconds).
    pub capability_timeout_secs: u64,

    /// Timeout for the remote catalog listing (seconds).
    pub remote_timeout_secs: u64,

    /// Print the merged document instead of writing it.
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(CONFIG_FILE_NAME),
            ollama_api_url: DEFAULT_OLLAMA_API_URL.to_string(),
            provider: LocalProvider::default(),
            template: ModelTemplate::default(),
            blocklist: Blocklist::default(),
            remote_provider: Some("zai".to_string()),
            list_timeout_secs: 10,
            capability_timeout_secs: 10,
            remote_timeout_secs: 20,
            dry_run: false,
        }
    }
}

impl Config {
    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn capability_timeout(&self) -> Duration {
        Duration::from_secs(self.capability_timeout_secs)
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }
}

/// `$OPENCLAW_CONFIG_DIR/openclaw.json`, falling back to `$HOME/.openclaw/openclaw.json`.
///
/// Fails when neither variable is set to a non-empty value.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    resolve_config_path(
        std::env::var(CONFIG_DIR_ENV).ok(),
        std::env::var("HOME").ok(),
    )
}

fn resolve_config_path(
    config_dir: Option<String>,
    home: Option<String>,
) -> Result<PathBuf, ConfigError> {
    let dir = match (config_dir.filter(|d| !d.is_empty()), home.filter(|h| !h.is_empty())) {
        (Some(dir), _) => PathBuf::from(dir),
        (None, Some(home)) => PathBuf::from(home).join(".openclaw"),
        (None, None) => return Err(ConfigError::NoConfigLocation),
    };
    Ok(dir.join(CONFIG_FILE_NAME))
}
