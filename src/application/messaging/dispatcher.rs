//! Message dispatcher - Routes prefix commands to handlers

use std::collections::HashMap;

use crate::domain::entities::{CommandCatalog, Content, IncomingMessage, Reply};
use crate::domain::traits::Bot;
use crate::application::errors::BotError;
use super::parser::MessageParser;
use super::replies;

/// Commands reachable through the text prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixCommand {
    Ping,
    Hello,
    Help,
}

impl PrefixCommand {
    pub const ALL: [PrefixCommand; 3] = [PrefixCommand::Ping, PrefixCommand::Hello, PrefixCommand::Help];

    pub fn name(&self) -> &'static str {
        match self {
            PrefixCommand::Ping => "ping",
            PrefixCommand::Hello => "hello",
            PrefixCommand::Help => "help",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PrefixCommand::Ping => "Check bot latency",
            PrefixCommand::Hello => "Get a greeting",
            PrefixCommand::Help => "Show this message",
        }
    }
}

/// Why a message was not answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    FromBot,
    NoPrefix,
}

/// Result of dispatching one message
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Ignored(IgnoreReason),
    Replied(Reply),
}

/// Message dispatcher - one reply per prefixed command message
pub struct MessageDispatcher {
    parser: MessageParser,
    commands: HashMap<&'static str, PrefixCommand>,
    slash_commands: CommandCatalog,
}

impl MessageDispatcher {
    pub fn new(prefix: impl Into<String>, slash_commands: CommandCatalog) -> Self {
        let commands = PrefixCommand::ALL
            .into_iter()
            .map(|c| (c.name(), c))
            .collect();

        Self {
            parser: MessageParser::new(prefix),
            commands,
            slash_commands,
        }
    }

    pub fn prefix(&self) -> &str {
        self.parser.prefix()
    }

    /// Resolve a case-folded command name
    pub fn lookup(&self, name: &str) -> Option<PrefixCommand> {
        self.commands.get(name).copied()
    }

    /// Build the reply for `name` without sending it
    pub async fn handle<B: Bot + ?Sized>(&self, bot: &B, name: &str, message: &IncomingMessage) -> Reply {
        match self.lookup(name) {
            Some(PrefixCommand::Ping) => replies::ping(bot.latency().await),
            Some(PrefixCommand::Hello) => replies::hello(&message.author),
            Some(PrefixCommand::Help) => replies::help(self.prefix(), &self.slash_commands),
            None => replies::unknown_prefix_command(self.prefix()),
        }
    }

    /// Process a message through the dispatcher
    pub async fn dispatch<B: Bot + ?Sized>(&self, bot: &B, message: &IncomingMessage) -> Result<DispatchOutcome, BotError> {
        if message.from_bot() {
            return Ok(DispatchOutcome::Ignored(IgnoreReason::FromBot));
        }

        let Content::Command { name, args } = self.parser.parse(&message.text) else {
            return Ok(DispatchOutcome::Ignored(IgnoreReason::NoPrefix));
        };

        tracing::debug!("[{}] command {:?} args {:?}", message.channel_id, name, args);

        let reply = self.handle(bot, &name, message).await;
        bot.reply_to_message(message, &reply).await?;

        Ok(DispatchOutcome::Replied(reply))
    }
}
