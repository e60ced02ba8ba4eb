//! Discord REST client for command registration

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::domain::entities::CommandDescriptor;
use crate::domain::traits::CommandRegistrar;
use crate::infrastructure::config::DEFAULT_API_BASE;

/// Application command type for slash commands
const CHAT_INPUT: u8 = 1;

#[derive(Debug, Serialize)]
struct CommandPayload<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(rename = "type")]
    kind: u8,
}

#[derive(Debug, Deserialize)]
struct RegisteredCommand {
    id: String,
    name: String,
}

/// Discord REST adapter
pub struct DiscordRest {
    token: String,
    api_base: String,
    client: Client,
}

impl DiscordRest {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_base(token, DEFAULT_API_BASE)
    }

    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: api_base.into(),
            client: Client::new(),
        }
    }

    /// Get the URL of the global command list of an application
    fn commands_url(&self, application_id: &str) -> String {
        format!(
            "{}/applications/{}/commands",
            self.api_base.trim_end_matches('/'),
            application_id
        )
    }

    fn payload(commands: &[CommandDescriptor]) -> Vec<CommandPayload<'_>> {
        commands
            .iter()
            .map(|c| CommandPayload {
                name: &c.name,
                description: &c.description,
                kind: CHAT_INPUT,
            })
            .collect()
    }
}

#[async_trait]
impl CommandRegistrar for DiscordRest {
    async fn bulk_overwrite(&self, application_id: &str, commands: &[CommandDescriptor]) -> Result<usize, BotError> {
        let url = self.commands_url(application_id);

        let response = self.client
            .put(&url)
            .header("Authorization", format!("Bot {}", self.token))
            .json(&Self::payload(commands))
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(BotError::Auth("Discord rejected the bot token".to_string()));
        }
        if !status.is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(BotError::Network(format!("Failed to register commands ({}): {}", status, error)));
        }

        let registered: Vec<RegisteredCommand> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        for command in &registered {
            tracing::debug!("Registered /{} ({})", command.name, command.id);
        }
        Ok(registered.len())
    }
}
