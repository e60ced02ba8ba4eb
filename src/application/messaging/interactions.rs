//! Interaction dispatcher - Routes slash commands and guarantees a terminal reply

use std::collections::HashMap;

use crate::domain::entities::{Interaction, Reply, ReplyAction, ReplyState};
use crate::domain::traits::Bot;
use crate::application::errors::BotError;
use super::replies;

/// Commands reachable as platform slash commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlashCommand {
    Ping,
    Info,
}

impl SlashCommand {
    pub const ALL: [SlashCommand; 2] = [SlashCommand::Info, SlashCommand::Ping];

    pub fn name(&self) -> &'static str {
        match self {
            SlashCommand::Ping => "ping",
            SlashCommand::Info => "info",
        }
    }
}

/// Sends interaction replies, enforcing the reply-state machine.
///
/// State only advances after the platform accepted the call.
pub struct InteractionResponder<'a, B: Bot + ?Sized> {
    bot: &'a B,
    interaction: &'a mut Interaction,
}

impl<'a, B: Bot + ?Sized> InteractionResponder<'a, B> {
    pub fn new(bot: &'a B, interaction: &'a mut Interaction) -> Self {
        Self { bot, interaction }
    }

    pub fn bot(&self) -> &B {
        self.bot
    }

    pub fn state(&self) -> ReplyState {
        self.interaction.state()
    }

    pub async fn reply(&mut self, reply: &Reply) -> Result<(), BotError> {
        self.interaction.check(ReplyAction::Reply)?;
        self.bot.respond(self.interaction, reply).await?;
        self.interaction.advance(ReplyAction::Reply)?;
        Ok(())
    }

    pub async fn defer(&mut self, ephemeral: bool) -> Result<(), BotError> {
        self.interaction.check(ReplyAction::Defer)?;
        self.bot.defer(self.interaction, ephemeral).await?;
        self.interaction.advance(ReplyAction::Defer)?;
        Ok(())
    }

    pub async fn follow_up(&mut self, reply: &Reply) -> Result<(), BotError> {
        self.interaction.check(ReplyAction::FollowUp)?;
        self.bot.follow_up(self.interaction, reply).await?;
        self.interaction.advance(ReplyAction::FollowUp)?;
        Ok(())
    }

    /// Initial reply if unanswered, follow-up otherwise
    pub async fn send(&mut self, reply: &Reply) -> Result<ReplyAction, BotError> {
        let action = self.state().message_action();
        match action {
            ReplyAction::FollowUp => self.follow_up(reply).await?,
            _ => self.reply(reply).await?,
        }
        Ok(action)
    }
}

/// Result of dispatching one interaction
#[derive(Debug)]
pub enum InteractionOutcome {
    /// The handler finished without error
    Completed,
    /// The handler failed; `fallback` says how the failure notice went out
    Recovered {
        error: BotError,
        fallback: Result<ReplyAction, BotError>,
    },
}

impl InteractionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, InteractionOutcome::Completed)
    }
}

/// Interaction dispatcher - name to handler table with an error boundary
pub struct InteractionDispatcher {
    commands: HashMap<&'static str, SlashCommand>,
}

impl InteractionDispatcher {
    pub fn new() -> Self {
        let commands = SlashCommand::ALL
            .into_iter()
            .map(|c| (c.name(), c))
            .collect();

        Self { commands }
    }

    pub fn lookup(&self, name: &str) -> Option<SlashCommand> {
        self.commands.get(name).copied()
    }

    /// Run the handler for `interaction`, then recover from any failure
    pub async fn dispatch<B: Bot + ?Sized>(&self, bot: &B, interaction: &mut Interaction) -> InteractionOutcome {
        let command = self.lookup(&interaction.command_name);
        let result = {
            let mut responder = InteractionResponder::new(bot, interaction);
            Self::run(command, &mut responder).await
        };

        recover(bot, interaction, result).await
    }

    async fn run<B: Bot + ?Sized>(command: Option<SlashCommand>, responder: &mut InteractionResponder<'_, B>) -> Result<(), BotError> {
        let reply = match command {
            Some(SlashCommand::Ping) => replies::ping(responder.bot().latency().await),
            Some(SlashCommand::Info) => {
                let stats = responder.bot().stats().await?;
                replies::info(stats, responder.bot().latency().await)
            }
            None => replies::unknown_slash_command(),
        };

        responder.reply(&reply).await
    }
}

impl Default for InteractionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Error boundary: turns a failed handler result into an ephemeral notice
/// sent through whichever primitive the reply state still allows.
pub async fn recover<B: Bot + ?Sized>(bot: &B, interaction: &mut Interaction, result: Result<(), BotError>) -> InteractionOutcome {
    let error = match result {
        Ok(()) => return InteractionOutcome::Completed,
        Err(e) => e,
    };

    tracing::error!(
        "Error handling interaction /{} ({}): {}",
        interaction.command_name,
        interaction.state(),
        error
    );

    let notice = replies::command_failed();
    let fallback = InteractionResponder::new(bot, interaction).send(&notice).await;
    if let Err(e) = &fallback {
        tracing::error!("Failed to deliver error notice for /{}: {}", interaction.command_name, e);
    }

    InteractionOutcome::Recovered { error, fallback }
}
