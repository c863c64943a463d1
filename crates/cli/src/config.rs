//! CLI configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vpcsync_provider::ClientConfig;

/// vpcsync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database holding the state of every managed subnet
    pub state_path: PathBuf,

    /// Provider API configuration
    pub provider: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_path: default_store_path().join("state.db"),
            provider: ProviderConfig::default(),
        }
    }
}

/// Provider API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the provider API
    pub endpoint: String,

    /// Region the subnets are managed in
    pub region: String,

    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let defaults = ClientConfig::default();
        Self {
            endpoint: defaults.endpoint,
            region: defaults.region,
            timeout_secs: defaults.timeout.as_secs(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let path = expand_home(path);
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let mut config: Self = toml::from_str(&content)?;
            config.state_path = expand_home(&config.state_path);
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let path = expand_home(path);
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Settings for the provider HTTP client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.provider.endpoint.clone(),
            region: self.provider.region.clone(),
            timeout: Duration::from_secs(self.provider.timeout_secs),
        }
    }
}

/// Default store path
pub fn default_store_path() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vpcsync")
}

/// Resolve a leading `~` against the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
