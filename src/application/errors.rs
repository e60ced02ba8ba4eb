//! Application layer errors

use thiserror::Error;
use crate::domain::entities::{ReplyAction, ReplyState};

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Reply state error: {0}")]
    ReplyState(#[from] ReplyStateError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotError {
    /// Errors that leave the bot unable to operate at all
    pub fn is_fatal(&self) -> bool {
        matches!(self, BotError::Config(_) | BotError::Auth(_))
    }
}

/// Illegal interaction reply primitive for the current state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyStateError {
    #[error("cannot {action}: interaction already {state}")]
    AlreadyAcknowledged { state: ReplyState, action: ReplyAction },

    #[error("cannot follow up: interaction not acknowledged yet")]
    NotAcknowledged,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
