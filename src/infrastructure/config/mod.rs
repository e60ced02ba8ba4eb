//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Discord REST API root used for command registration
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub discord: DiscordConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DiscordConfig {
    pub token: Option<String>,
    pub application_id: Option<String>,
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "discord-command-bot".to_string(),
            prefix: "!".to_string(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: None,
            application_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Validated credentials needed to connect
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: String,
    pub application_id: Option<String>,
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config {}: {}", path.display(), e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// Override fields from environment variables
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    /// Override fields from any key lookup; empty values are ignored
    pub fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get("DISCORD_TOKEN") {
            self.discord.token = Some(token);
        }

        if let Some(id) = get("DISCORD_APPLICATION_ID").or_else(|| get("CLIENT_ID")) {
            self.discord.application_id = Some(id);
        }

        if let Some(prefix) = get("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }

        if let Some(base) = get("DISCORD_API_BASE") {
            self.discord.api_base = base;
        }
    }

    /// Check everything the bot cannot run without
    pub fn validate(&self) -> Result<Credentials, ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::InvalidValue("bot.prefix must not be empty".to_string()));
        }

        let token = self
            .discord
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingField("DISCORD_TOKEN".to_string()))?;

        let application_id = match self.discord.application_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => {
                // Registration reports the rejection; the gateway does not need the id
                if !id.chars().all(|c| c.is_ascii_digit()) {
                    tracing::warn!("Application id {:?} is not numeric, command registration will likely fail", id);
                }
                Some(id.to_string())
            }
            _ => None,
        };

        Ok(Credentials {
            token: token.to_string(),
            application_id,
        })
    }
}
