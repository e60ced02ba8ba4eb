//! Live gateway session implementing the `Bot` seam

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serenity::client::Context;
use serenity::gateway::ShardManager;
use serenity::model::application::CommandInteraction;
use serenity::model::id::{ChannelId, MessageId};

use crate::application::errors::BotError;
use crate::domain::entities::{IncomingMessage, Interaction, Reply};
use crate::domain::traits::{Bot, BotInfo, BotStats};
use super::convert;

/// Per-event view of the connection: the serenity context of the shard
/// that delivered the event, plus the interaction being answered if any.
pub struct DiscordSession {
    ctx: Context,
    shard_manager: Option<Arc<ShardManager>>,
    command: Option<CommandInteraction>,
}

impl DiscordSession {
    pub fn new(ctx: Context, shard_manager: Option<Arc<ShardManager>>) -> Self {
        Self {
            ctx,
            shard_manager,
            command: None,
        }
    }

    pub fn with_command(mut self, command: CommandInteraction) -> Self {
        self.command = Some(command);
        self
    }

    fn command_for(&self, interaction: &Interaction) -> Result<&CommandInteraction, BotError> {
        self.command
            .as_ref()
            .filter(|c| c.id.to_string() == interaction.id)
            .ok_or_else(|| BotError::Internal(format!("interaction {} is not bound to this session", interaction.id)))
    }
}

/// Map serenity failures onto the bot's error taxonomy
pub fn map_serenity_error(error: serenity::Error) -> BotError {
    match &error {
        serenity::Error::Gateway(serenity::gateway::GatewayError::InvalidAuthentication) => {
            BotError::Auth(error.to_string())
        }
        serenity::Error::Http(http) => {
            if http.status_code().map(|s| s.as_u16()) == Some(401) {
                BotError::Auth(error.to_string())
            } else {
                BotError::Network(error.to_string())
            }
        }
        serenity::Error::Gateway(_) | serenity::Error::Tungstenite(_) => BotError::Gateway(error.to_string()),
        _ => BotError::Internal(error.to_string()),
    }
}

#[async_trait]
impl Bot for DiscordSession {
    async fn reply_to_message(&self, message: &IncomingMessage, reply: &Reply) -> Result<(), BotError> {
        let channel_id = convert::parse_snowflake(&message.channel_id)
            .map(ChannelId::new)
            .ok_or_else(|| BotError::Parse(format!("invalid channel id {:?}", message.channel_id)))?;
        let message_id = convert::parse_snowflake(&message.id)
            .map(MessageId::new)
            .ok_or_else(|| BotError::Parse(format!("invalid message id {:?}", message.id)))?;

        tracing::debug!("Replying in {} to {}", channel_id, message_id);

        let builder = convert::message_builder(reply).reference_message((channel_id, message_id));
        channel_id
            .send_message(&self.ctx, builder)
            .await
            .map_err(map_serenity_error)?;
        Ok(())
    }

    async fn respond(&self, interaction: &Interaction, reply: &Reply) -> Result<(), BotError> {
        self.command_for(interaction)?
            .create_response(&self.ctx, convert::response_builder(reply))
            .await
            .map_err(map_serenity_error)
    }

    async fn defer(&self, interaction: &Interaction, ephemeral: bool) -> Result<(), BotError> {
        let command = self.command_for(interaction)?;
        let result = if ephemeral {
            command.defer_ephemeral(&self.ctx).await
        } else {
            command.defer(&self.ctx).await
        };
        result.map_err(map_serenity_error)
    }

    async fn follow_up(&self, interaction: &Interaction, reply: &Reply) -> Result<(), BotError> {
        self.command_for(interaction)?
            .create_followup(&self.ctx, convert::followup_builder(reply))
            .await
            .map_err(map_serenity_error)?;
        Ok(())
    }

    async fn latency(&self) -> Option<Duration> {
        let manager = self.shard_manager.as_ref()?;
        let runners = manager.runners.lock().await;
        runners.get(&self.ctx.shard_id).and_then(|runner| runner.latency)
    }

    async fn stats(&self) -> Result<BotStats, BotError> {
        Ok(BotStats {
            guilds: self.ctx.cache.guild_count(),
            users: self.ctx.cache.user_count(),
        })
    }

    fn bot_info(&self) -> BotInfo {
        let user = self.ctx.cache.current_user();
        BotInfo {
            id: user.id.to_string(),
            name: user.name.clone(),
        }
    }
}
