//! Discord adapter
//!
//! The gateway connection is owned by serenity; this module translates its
//! events into `EventService` calls and registers commands over REST.

pub mod convert;
pub mod rest;
pub mod session;

use std::future::Future;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serenity::client::{Client, Context, EventHandler};
use serenity::gateway::{ConnectionStage, ShardManager, ShardStageUpdateEvent};
use serenity::model::application::Interaction as GatewayInteraction;
use serenity::model::channel::Message;
use serenity::model::event::ResumedEvent;
use serenity::model::gateway::Ready;
use serenity::prelude::GatewayIntents;

use crate::application::errors::BotError;
use crate::application::services::EventService;
use crate::domain::traits::{BotInfo, CommandRegistrar};

pub use rest::DiscordRest;
pub use session::{map_serenity_error, DiscordSession};

/// Gateway intents the bot subscribes to
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS
}

/// serenity event handler forwarding to the event service
pub struct Handler {
    service: Arc<EventService>,
    registrar: Arc<dyn CommandRegistrar>,
    shard_manager: Arc<OnceCell<Arc<ShardManager>>>,
}

impl Handler {
    pub fn new(service: Arc<EventService>, registrar: Arc<dyn CommandRegistrar>) -> Self {
        Self {
            service,
            registrar,
            shard_manager: Arc::new(OnceCell::new()),
        }
    }

    fn session(&self, ctx: Context) -> DiscordSession {
        DiscordSession::new(ctx, self.shard_manager.get().cloned())
    }
}

#[serenity::async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        let info = BotInfo {
            id: ready.user.id.to_string(),
            name: ready.user.tag(),
        };
        self.service
            .on_ready(&info, ready.guilds.len(), self.registrar.as_ref())
            .await;
    }

    async fn message(&self, ctx: Context, new_message: Message) {
        let message = convert::message_from(&new_message);
        let session = self.session(ctx);
        // Failures are logged by the service
        let _ = self.service.on_message(&session, &message).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: GatewayInteraction) {
        let GatewayInteraction::Command(command) = interaction else {
            return;
        };
        if !convert::is_chat_input(command.data.kind) {
            tracing::debug!("Ignoring {:?} command /{}", command.data.kind, command.data.name);
            return;
        }

        let mut pending = convert::interaction_from(&command);
        let session = self.session(ctx).with_command(command);
        self.service.on_interaction(&session, &mut pending).await;
    }

    async fn resume(&self, _ctx: Context, _event: ResumedEvent) {
        tracing::info!("Gateway session resumed");
    }

    async fn shard_stage_update(&self, _ctx: Context, event: ShardStageUpdateEvent) {
        match event.new {
            ConnectionStage::Disconnected | ConnectionStage::Resuming => {
                self.service.on_client_warning(&format!(
                    "shard {:?} moved from {:?} to {:?}",
                    event.shard_id, event.old, event.new
                ));
            }
            stage => tracing::debug!("Shard {:?} stage: {:?}", event.shard_id, stage),
        }
    }
}

/// Connect and run until the gateway stops or `shutdown` resolves.
///
/// Returns `Ok` on shutdown; login failures surface as `BotError::Auth`.
/// A gateway failure is reported to the event service before it is returned.
pub async fn run<F>(token: &str, service: Arc<EventService>, registrar: Arc<dyn CommandRegistrar>, shutdown: F) -> Result<(), BotError>
where
    F: Future<Output = ()>,
{
    let events = Arc::clone(&service);
    let handler = Handler::new(service, registrar);
    let shard_slot = Arc::clone(&handler.shard_manager);

    let mut client = Client::builder(token, intents())
        .event_handler(handler)
        .await
        .map_err(map_serenity_error)?;

    let shard_manager = Arc::clone(&client.shard_manager);
    let _ = shard_slot.set(Arc::clone(&shard_manager));

    tokio::select! {
        result = client.start() => result.map_err(|e| {
            let error = map_serenity_error(e);
            events.on_client_error(&error);
            error
        }),
        _ = shutdown => {
            tracing::info!("Closing gateway connection");
            shard_manager.shutdown_all().await;
            Ok(())
        }
    }
}
