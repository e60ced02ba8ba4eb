//! Canned replies produced by the command handlers

use std::time::Duration;

use crate::domain::entities::{CommandCatalog, Embed, EmbedField, Reply, User};
use crate::domain::traits::{latency_millis, BotStats};
use super::dispatcher::PrefixCommand;

pub const UNKNOWN_SLASH_COMMAND: &str = "Unknown command!";
pub const COMMAND_FAILED: &str = "There was an error executing this command!";

pub fn ping(latency: Option<Duration>) -> Reply {
    Reply::text(format!("Pong! Latency: {}ms", latency_millis(latency)))
}

pub fn hello(author: &User) -> Reply {
    Reply::text(format!("Hello {}! 👋", author.mention()))
}

/// Lists every prefix command followed by every slash command
pub fn help(prefix: &str, slash_commands: &CommandCatalog) -> Reply {
    let mut embed = Embed::new("Bot Commands").with_description("Available commands:");

    for command in PrefixCommand::ALL {
        embed = embed.with_field(EmbedField::inline(
            format!("{}{}", prefix, command.name()),
            command.description(),
        ));
    }
    for command in slash_commands.all() {
        embed = embed.with_field(EmbedField::inline(
            format!("/{}", command.name),
            format!("{} (slash command)", command.summary()),
        ));
    }

    Reply::embed(embed)
}

pub fn info(stats: BotStats, latency: Option<Duration>) -> Reply {
    let embed = Embed::new("Bot Information")
        .with_description("A Discord bot template")
        .with_field(EmbedField::inline("Guilds", stats.guilds.to_string()))
        .with_field(EmbedField::inline("Users", stats.users.to_string()))
        .with_field(EmbedField::inline("Latency", format!("{}ms", latency_millis(latency))));

    Reply::embed(embed)
}

pub fn unknown_prefix_command(prefix: &str) -> Reply {
    Reply::text(format!(
        "Unknown command. Use `{}help` to see available commands.",
        prefix
    ))
}

pub fn unknown_slash_command() -> Reply {
    Reply::text(UNKNOWN_SLASH_COMMAND).ephemeral()
}

pub fn command_failed() -> Reply {
    Reply::text(COMMAND_FAILED).ephemeral()
}
