use std::time::Duration;

use async_trait::async_trait;
use crate::domain::entities::{IncomingMessage, Interaction, Reply};
use crate::application::errors::BotError;

/// Bot trait - a live connection session with the messaging platform.
///
/// Reply-state bookkeeping is the caller's job; implementations just
/// perform the platform call.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Reply to a message in its channel
    async fn reply_to_message(&self, message: &IncomingMessage, reply: &Reply) -> Result<(), BotError>;

    /// Send the initial response to an interaction
    async fn respond(&self, interaction: &Interaction, reply: &Reply) -> Result<(), BotError>;

    /// Acknowledge an interaction without content
    async fn defer(&self, interaction: &Interaction, ephemeral: bool) -> Result<(), BotError>;

    /// Send a follow-up message to an acknowledged interaction
    async fn follow_up(&self, interaction: &Interaction, reply: &Reply) -> Result<(), BotError>;

    /// Last measured gateway round-trip, if any heartbeat was acknowledged yet
    async fn latency(&self) -> Option<Duration>;

    /// Counts from the client cache
    async fn stats(&self) -> Result<BotStats, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
}

/// Cache statistics reported by `/info`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BotStats {
    pub guilds: usize,
    pub users: usize,
}

/// Latency in whole milliseconds, `0` before the first measurement
pub fn latency_millis(latency: Option<Duration>) -> u128 {
    latency
        .map(|d| (d.as_micros() + 500) / 1000)
        .unwrap_or(0)
}
