use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;

use crate::domain::entities::{IncomingMessage, Interaction};
use crate::domain::traits::{Bot, BotInfo, CommandRegistrar};
use crate::application::errors::BotError;
use crate::application::messaging::{DispatchOutcome, InteractionDispatcher, InteractionOutcome, MessageDispatcher};
use super::command_service::{CommandService, SyncOutcome};

/// Last known state of slash-command registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStatus {
    Skipped,
    Registered { count: usize },
    Failed { reason: String },
}

impl From<&SyncOutcome> for RegistrationStatus {
    fn from(outcome: &SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::Skipped => RegistrationStatus::Skipped,
            SyncOutcome::Registered { count } => RegistrationStatus::Registered { count: *count },
            SyncOutcome::Failed { error } => RegistrationStatus::Failed { reason: error.to_string() },
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationStatus::Skipped => write!(f, "skipped (no application id)"),
            RegistrationStatus::Registered { count } => write!(f, "{} commands registered", count),
            RegistrationStatus::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

/// Entry point for every gateway event the bot reacts to
pub struct EventService {
    messages: MessageDispatcher,
    interactions: InteractionDispatcher,
    commands: CommandService,
    sync_claimed: AtomicBool,
    registration: OnceCell<RegistrationStatus>,
}

impl EventService {
    pub fn new(prefix: impl Into<String>, commands: CommandService) -> Self {
        Self {
            messages: MessageDispatcher::new(prefix, commands.catalog().clone()),
            interactions: InteractionDispatcher::new(),
            commands,
            sync_claimed: AtomicBool::new(false),
            registration: OnceCell::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        self.messages.prefix()
    }

    /// `None` until the first ready event finished registration
    pub fn registration_status(&self) -> Option<&RegistrationStatus> {
        self.registration.get()
    }

    /// Gateway reached ready. Registers commands on the first call only;
    /// returns `None` on reconnects.
    pub async fn on_ready<R: CommandRegistrar + ?Sized>(&self, info: &BotInfo, guilds: usize, registrar: &R) -> Option<SyncOutcome> {
        tracing::info!("Logged in as {} ({})", info.name, info.id);
        tracing::info!("Bot is in {} guilds", guilds);

        if self.sync_claimed.swap(true, Ordering::SeqCst) {
            match self.registration_status() {
                Some(status) => tracing::info!("Slash command registration: {}", status),
                None => tracing::info!("Slash command registration still in progress"),
            }
            return None;
        }

        let outcome = self.commands.synchronize(registrar).await;
        let status = RegistrationStatus::from(&outcome);
        tracing::info!("Slash command registration: {}", status);
        let _ = self.registration.set(status);
        Some(outcome)
    }

    pub async fn on_message<B: Bot + ?Sized>(&self, bot: &B, message: &IncomingMessage) -> Result<DispatchOutcome, BotError> {
        tracing::debug!("[{}] Message {} from {} at {}", message.channel_id, message.id, message.author, message.timestamp);
        let result = self.messages.dispatch(bot, message).await;
        if let Err(e) = &result {
            tracing::error!("[{}] Failed to handle message {}: {}", message.channel_id, message.id, e);
        }
        result
    }

    pub async fn on_interaction<B: Bot + ?Sized>(&self, bot: &B, interaction: &mut Interaction) -> InteractionOutcome {
        tracing::debug!(
            "Interaction /{} from {} in channel {:?} (guild {:?})",
            interaction.command_name,
            interaction.user,
            interaction.channel_id,
            interaction.guild_id
        );
        let outcome = self.interactions.dispatch(bot, interaction).await;
        if !outcome.is_completed() {
            tracing::debug!("Interaction /{} ended in state {}", interaction.command_name, interaction.state());
        }
        outcome
    }

    /// Transport errors are only logged; the gateway client reconnects itself
    pub fn on_client_error(&self, error: &BotError) {
        tracing::error!("Discord client error: {}", error);
    }

    pub fn on_client_warning(&self, warning: &str) {
        tracing::warn!("Discord client warning: {}", warning);
    }
}
