//! Console adapter for development/testing

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::application::errors::BotError;
use crate::application::messaging::{DispatchOutcome, IgnoreReason};
use crate::application::services::EventService;
use crate::domain::entities::{IncomingMessage, Interaction, Reply, User};
use crate::domain::traits::{Bot, BotInfo, BotStats};

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "discord-command-bot".to_string(),
            },
        }
    }

    /// Text printed for a reply
    pub fn render(reply: &Reply) -> String {
        let mut out = format!("[BOT] {}", reply.to_plain_text());
        if reply.ephemeral {
            out.push_str("\n      (only you can see this)");
        }
        out
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn reply_to_message(&self, _message: &IncomingMessage, reply: &Reply) -> Result<(), BotError> {
        println!("{}", Self::render(reply));
        Ok(())
    }

    async fn respond(&self, _interaction: &Interaction, reply: &Reply) -> Result<(), BotError> {
        println!("{}", Self::render(reply));
        Ok(())
    }

    async fn defer(&self, _interaction: &Interaction, _ephemeral: bool) -> Result<(), BotError> {
        println!("[BOT] is thinking...");
        Ok(())
    }

    async fn follow_up(&self, _interaction: &Interaction, reply: &Reply) -> Result<(), BotError> {
        println!("{}", Self::render(reply));
        Ok(())
    }

    async fn latency(&self) -> Option<Duration> {
        Some(Duration::ZERO)
    }

    async fn stats(&self) -> Result<BotStats, BotError> {
        Ok(BotStats::default())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// Read lines from stdin until EOF. `/name` lines go through the slash
/// path, everything else through the prefix path.
pub async fn run_console(service: Arc<EventService>) -> Result<(), BotError> {
    let bot = ConsoleAdapter::new();
    let user = User::new("console-user", std::env::var("USER").unwrap_or_else(|_| "you".to_string()));

    tracing::info!("Bot started: @{} (console), prefix {:?}", bot.bot_info().name, service.prefix());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await.map_err(|e| BotError::Internal(e.to_string()))?;
        stdout.flush().await.map_err(|e| BotError::Internal(e.to_string()))?;

        let Some(line) = lines.next_line().await.map_err(|e| BotError::Internal(e.to_string()))? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix('/') {
            let name = command.split_whitespace().next().unwrap_or_default();
            let mut interaction = Interaction::new(uuid::Uuid::new_v4().to_string(), "console", name, user.clone());
            service.on_interaction(&bot, &mut interaction).await;
            continue;
        }

        let message = IncomingMessage::new("console", user.clone(), input);
        if let Ok(DispatchOutcome::Ignored(IgnoreReason::NoPrefix)) = service.on_message(&bot, &message).await {
            println!("(not a command, try {}help)", service.prefix());
        }
    }

    Ok(())
}
