//! Configuration management
//!
//! The six relay settings always come from the environment. An optional YAML
//! file carries the non-secret knobs; environment values win over it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::application::errors::ConfigError;
use crate::domain::entities::{CommandVariant, Credentials};

pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
pub const ENV_CLIENT_ID: &str = "CLIENT_ID";
pub const ENV_GUILD_ID: &str = "GUILD_ID";
pub const ENV_TARGET_URL: &str = "TARGET_URL";
pub const ENV_HTTP_USERNAME: &str = "HTTP_USERNAME";
pub const ENV_HTTP_PASSWORD: &str = "HTTP_PASSWORD";

pub const DEFAULT_DASHBOARD_URL: &str =
    "https://nocodb.hophamlam.com/dashboard/#/nc/gallery/21715fa0-2dfa-4fe6-a46d-0cc02de7944c";

/// Source of environment values
pub trait ReadEnv {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment
pub struct ProcessEnv;

impl ReadEnv for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Relay configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DiscordConfig {
    #[serde(skip_serializing)]
    pub token: String,
    pub application_id: String,
    pub guild_id: String,
    pub activity: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RelayConfig {
    pub target_url: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub dashboard_url: String,
    pub command: CommandVariant,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub console: bool,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            application_id: String::new(),
            guild_id: String::new(),
            activity: "DeepSeek AI Research".to_string(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            target_url: String::new(),
            username: String::new(),
            password: String::new(),
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
            command: CommandVariant::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            console: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            relay: RelayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load a YAML file (no environment applied)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Defaults plus the process environment
    pub fn load_env() -> Self {
        Self::default().with_env(&ProcessEnv)
    }

    /// Overlay environment values on top of this config
    pub fn with_env(mut self, env: &impl ReadEnv) -> Self {
        let targets: [(&str, &mut String); 6] = [
            (ENV_BOT_TOKEN, &mut self.discord.token),
            (ENV_CLIENT_ID, &mut self.discord.application_id),
            (ENV_GUILD_ID, &mut self.discord.guild_id),
            (ENV_TARGET_URL, &mut self.relay.target_url),
            (ENV_HTTP_USERNAME, &mut self.relay.username),
            (ENV_HTTP_PASSWORD, &mut self.relay.password),
        ];

        for (key, slot) in targets {
            if let Some(value) = env.var(key) {
                *slot = value;
            }
        }

        self
    }

    /// Names of required environment values that are still empty.
    ///
    /// Nothing is rejected here; a missing value surfaces when the
    /// login, registration or HTTP call that needs it fails.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (ENV_BOT_TOKEN, &self.discord.token),
            (ENV_CLIENT_ID, &self.discord.application_id),
            (ENV_GUILD_ID, &self.discord.guild_id),
            (ENV_TARGET_URL, &self.relay.target_url),
            (ENV_HTTP_USERNAME, &self.relay.username),
            (ENV_HTTP_PASSWORD, &self.relay.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.relay.username, &self.relay.password)
    }

    /// Serialize to YAML without secrets
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}
