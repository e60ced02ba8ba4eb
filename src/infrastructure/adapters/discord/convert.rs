//! Conversions between serenity models and domain entities

use chrono::{DateTime, Utc};
use serenity::builder::{
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage,
};
use serenity::model::application::{CommandInteraction, CommandType};
use serenity::model::channel::Message;
use serenity::model::Timestamp;

use crate::domain::entities::{Embed, IncomingMessage, Interaction, Reply, ReplyBody, User};

pub fn user_from(user: &serenity::model::user::User) -> User {
    let mut converted = User::new(user.id.to_string(), user.name.clone());
    if let Some(global_name) = &user.global_name {
        converted = converted.with_global_name(global_name.clone());
    }
    if user.bot {
        converted = converted.as_bot();
    }
    converted
}

pub fn message_from(msg: &Message) -> IncomingMessage {
    let timestamp = DateTime::<Utc>::from_timestamp(msg.timestamp.unix_timestamp(), 0)
        .unwrap_or_else(Utc::now);

    IncomingMessage::new(msg.channel_id.to_string(), user_from(&msg.author), msg.content.clone())
        .with_id(msg.id.to_string())
        .with_timestamp(timestamp)
}

pub fn interaction_from(command: &CommandInteraction) -> Interaction {
    let mut interaction = Interaction::new(
        command.id.to_string(),
        command.token.clone(),
        command.data.name.clone(),
        user_from(&command.user),
    )
    .with_channel(command.channel_id.to_string());

    if let Some(guild_id) = command.guild_id {
        interaction = interaction.with_guild(guild_id.to_string());
    }
    interaction
}

pub fn embed_builder(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .title(&embed.title)
        .color(embed.color);

    if let Some(description) = &embed.description {
        builder = builder.description(description);
    }
    for field in &embed.fields {
        builder = builder.field(&field.name, &field.value, field.inline);
    }
    if let Ok(timestamp) = Timestamp::parse(&embed.timestamp.to_rfc3339()) {
        builder = builder.timestamp(timestamp);
    }
    builder
}

pub fn message_builder(reply: &Reply) -> CreateMessage {
    match &reply.body {
        ReplyBody::Text(text) => CreateMessage::new().content(text),
        ReplyBody::Embed(embed) => CreateMessage::new().embed(embed_builder(embed)),
    }
}

pub fn response_builder(reply: &Reply) -> CreateInteractionResponse {
    let message = match &reply.body {
        ReplyBody::Text(text) => CreateInteractionResponseMessage::new().content(text),
        ReplyBody::Embed(embed) => CreateInteractionResponseMessage::new().embed(embed_builder(embed)),
    };

    CreateInteractionResponse::Message(message.ephemeral(reply.ephemeral))
}

pub fn followup_builder(reply: &Reply) -> CreateInteractionResponseFollowup {
    let followup = match &reply.body {
        ReplyBody::Text(text) => CreateInteractionResponseFollowup::new().content(text),
        ReplyBody::Embed(embed) => CreateInteractionResponseFollowup::new().embed(embed_builder(embed)),
    };

    followup.ephemeral(reply.ephemeral)
}

/// Only slash commands are routed; context-menu commands share the event
pub fn is_chat_input(kind: CommandType) -> bool {
    kind == CommandType::ChatInput
}

/// Parse a platform snowflake; ids are never zero
pub fn parse_snowflake(id: &str) -> Option<u64> {
    id.parse::<u64>().ok().filter(|id| *id != 0)
}
